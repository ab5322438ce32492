use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Master macro defining the operator vocabulary: the enum, its wire names and arity.
macro_rules! define_operators {
    (@unary Unary) => { true };
    (@unary Binary) => { false };

    ( $( ($variant:ident, $name:literal, $arity:ident) ),* $(,)? ) => {
        /// Every comparison operator a condition or rule can use.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum Operator {
            $( #[serde(rename = $name)] $variant, )*
        }

        impl Operator {
            pub const ALL: &'static [Operator] = &[ $( Operator::$variant, )* ];

            /// The operator's name as written in node configuration.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Operator::$variant => $name, )*
                }
            }

            /// Unary operators only look at the first value.
            pub fn is_unary(&self) -> bool {
                match self {
                    $( Operator::$variant => define_operators!(@unary $arity), )*
                }
            }
        }

        impl FromStr for Operator {
            type Err = ConfigError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $name => Ok(Operator::$variant), )*
                    _ => Err(ConfigError::UnknownOperator(s.to_string())),
                }
            }
        }
    };
}

define_operators! {
    (Exists, "exists", Unary),
    (NotExists, "notExists", Unary),
    (IsEmpty, "isEmpty", Unary),
    (IsNotEmpty, "isNotEmpty", Unary),
    (True, "true", Unary),
    (False, "false", Unary),
    (Equal, "equal", Binary),
    (NotEqual, "notEqual", Binary),
    (Contains, "contains", Binary),
    (NotContains, "notContains", Binary),
    (StartsWith, "startsWith", Binary),
    (NotStartsWith, "notStartsWith", Binary),
    (EndsWith, "endsWith", Binary),
    (NotEndsWith, "notEndsWith", Binary),
    (Regex, "regex", Binary),
    (NotRegex, "notRegex", Binary),
    (Gt, "gt", Binary),
    (Lt, "lt", Binary),
    (Gte, "gte", Binary),
    (Lte, "lte", Binary),
    (After, "after", Binary),
    (Before, "before", Binary),
    (AfterOrEqual, "afterOrEqual", Binary),
    (BeforeOrEqual, "beforeOrEqual", Binary),
    (LengthEqual, "lengthEqual", Binary),
    (LengthNotEqual, "lengthNotEqual", Binary),
    (LengthGt, "lengthGt", Binary),
    (LengthLt, "lengthLt", Binary),
    (LengthGte, "lengthGte", Binary),
    (LengthLte, "lengthLte", Binary),
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The declared type a condition's values are coerced to before comparing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataType {
    #[default]
    String,
    Number,
    #[serde(alias = "datetime")]
    DateTime,
    Boolean,
    Array,
    Object,
}

use Operator::*;

const STRING_OPERATORS: &[Operator] = &[
    Exists,
    NotExists,
    IsEmpty,
    IsNotEmpty,
    Equal,
    NotEqual,
    Contains,
    NotContains,
    StartsWith,
    NotStartsWith,
    EndsWith,
    NotEndsWith,
    Regex,
    NotRegex,
];

const NUMBER_OPERATORS: &[Operator] = &[
    Exists, NotExists, IsEmpty, IsNotEmpty, Equal, NotEqual, Gt, Lt, Gte, Lte,
];

const DATE_TIME_OPERATORS: &[Operator] = &[
    Exists,
    NotExists,
    IsEmpty,
    IsNotEmpty,
    Equal,
    NotEqual,
    After,
    Before,
    AfterOrEqual,
    BeforeOrEqual,
];

const BOOLEAN_OPERATORS: &[Operator] = &[
    Exists, NotExists, IsEmpty, IsNotEmpty, True, False, Equal, NotEqual,
];

const ARRAY_OPERATORS: &[Operator] = &[
    Exists,
    NotExists,
    IsEmpty,
    IsNotEmpty,
    Contains,
    NotContains,
    LengthEqual,
    LengthNotEqual,
    LengthGt,
    LengthLt,
    LengthGte,
    LengthLte,
];

const OBJECT_OPERATORS: &[Operator] = &[Exists, NotExists, IsEmpty, IsNotEmpty];

/// Operators a Switch-node rule may use. Rule values are always compared as strings.
pub const RULE_OPERATORS: &[Operator] = &[
    Equal,
    NotEqual,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    Regex,
    Exists,
    NotExists,
    IsEmpty,
    IsNotEmpty,
];

impl DataType {
    pub const ALL: &'static [DataType] = &[
        DataType::String,
        DataType::Number,
        DataType::DateTime,
        DataType::Boolean,
        DataType::Array,
        DataType::Object,
    ];

    /// The operators a condition of this type may use, in the order the UI lists them.
    pub fn operators(&self) -> &'static [Operator] {
        match self {
            DataType::String => STRING_OPERATORS,
            DataType::Number => NUMBER_OPERATORS,
            DataType::DateTime => DATE_TIME_OPERATORS,
            DataType::Boolean => BOOLEAN_OPERATORS,
            DataType::Array => ARRAY_OPERATORS,
            DataType::Object => OBJECT_OPERATORS,
        }
    }

    pub fn allows(&self, operator: Operator) -> bool {
        self.operators().contains(&operator)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Number => "number",
            DataType::DateTime => "dateTime",
            DataType::Boolean => "boolean",
            DataType::Array => "array",
            DataType::Object => "object",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DataType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownDataType(s.to_string()))
    }
}

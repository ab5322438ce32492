use clap::{Parser, Subcommand};
use switchyard::prelude::*;
use tracing_subscriber::EnvFilter;

/// Resolve paths, render templates and route workflow nodes from JSON files
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Optional path to an engine configuration JSON file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Log evaluation details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a variable path such as `NodeA.items[0].name`
    Resolve {
        /// Path to the input context JSON file (an object keyed by node name)
        context_path: String,
        path: String,
    },
    /// Render a template against an input context
    Render {
        context_path: String,
        text: String,
        /// Print highlight spans instead of substituted text
        #[arg(long)]
        highlight: bool,
    },
    /// Evaluate an If-node or Switch-node configuration
    Route {
        context_path: String,
        /// Path to the node configuration JSON file
        node_path: String,
    },
    /// Validate a node configuration without evaluating it
    Validate { node_path: String },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let engine_config = match &cli.config {
        Some(path) => EngineConfig::from_file(path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to load engine config '{}': {}", path, e))
        }),
        None => EngineConfig::default(),
    };
    let engine = Engine::builder().with_config(engine_config).build();

    match cli.command {
        Command::Resolve { context_path, path } => {
            let ctx = load_context(&context_path);
            let result = engine.resolve_path(&path, &ctx);
            match result.value {
                Some(value) => println!("{}", value),
                None => {
                    println!("-> '{}' does not exist", path);
                    std::process::exit(2);
                }
            }
        }
        Command::Render {
            context_path,
            text,
            highlight,
        } => {
            let ctx = load_context(&context_path);
            if highlight {
                let spans = engine.highlight(&text, &ctx);
                let json = serde_json::to_string_pretty(&spans)
                    .unwrap_or_else(|e| exit_with_error(&format!("Failed to encode spans: {}", e)));
                println!("{}", json);
            } else {
                println!("{}", engine.substitute(&text, &ctx));
            }
        }
        Command::Route {
            context_path,
            node_path,
        } => {
            let ctx = load_context(&context_path);
            let node = load_node(&node_path);
            let decision = engine
                .route_node(&node, &ctx)
                .unwrap_or_else(|e| exit_with_error(&format!("Routing failed: {}", e)));
            println!("  -> Output: {}", decision.output_name);
            if let Some(index) = decision.matched_rule {
                println!("  -> Matched rule: {}", index);
            }
            println!("  -> Reason: {}", decision.reason);
        }
        Command::Validate { node_path } => {
            let node = load_node(&node_path);
            let kind = match node {
                NodeConfig::If(set) => {
                    format!("If-node with {} condition(s)", set.conditions.len())
                }
                NodeConfig::Switch(set) => format!("Switch-node with {} rule(s)", set.rules.len()),
            };
            println!("Valid {}", kind);
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn load_context(path: &str) -> InputContext {
    InputContext::from_file(path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to load input context '{}': {}", path, e))
    })
}

fn load_node(path: &str) -> NodeConfig {
    NodeConfig::from_file(path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to load node configuration '{}': {}", path, e))
    })
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}

use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};

use archgraph_cli::{Diagram, RenderOptions, dot_source, render_diagrams};
use archgraph_core::Result;

#[derive(Parser, Debug)]
#[command(
    name = "archgraph",
    about = "archgraph: architecture diagrams as code, rendered through Graphviz",
    version
)]
pub struct Cli {
    #[command(flatten)]
    render: RenderOptions,

    /// Print DOT source to stdout instead of rendering
    #[arg(long, default_value_t = false, global = true)]
    dot: bool,

    #[command(subcommand)]
    target: Option<Target>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    #[command(flatten)]
    Diagram(Diagram),

    /// Render every diagram (the default)
    All,

    /// List the diagrams this tool can draw
    List,
}

impl Target {
    fn diagrams(self) -> Vec<Diagram> {
        match self {
            Target::Diagram(diagram) => vec![diagram],
            Target::All => Diagram::all().collect(),
            Target::List => Vec::new(),
        }
    }
}

/// Returns whether every requested diagram succeeded.
pub fn run(args: Cli) -> Result<bool> {
    let total_start = Instant::now();
    let target = args.target.unwrap_or(Target::All);

    if target == Target::List {
        for diagram in Diagram::all() {
            println!("{diagram}\t{}", diagram.file_name());
        }
        return Ok(true);
    }

    let diagrams = target.diagrams();
    if args.dot {
        for diagram in diagrams {
            println!("{}", dot_source(diagram, &args.render)?);
        }
        return Ok(true);
    }

    let dispatcher = args.render.dispatcher();
    let mut ok = true;
    for (diagram, result) in render_diagrams(&dispatcher, &diagrams, &args.render) {
        match result {
            Ok(path) => println!("Wrote: {}", path.display()),
            Err(e) => {
                ok = false;
                eprintln!("Error: {diagram}: {e:?}");
            }
        }
    }

    let total_secs = total_start.elapsed().as_secs_f64();
    tracing::info!(total_secs, "complete");
    Ok(ok)
}

pub fn main() -> ExitCode {
    let args = Cli::parse();

    // Initialize tracing subscriber for logging
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:?}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archgraph_render::Layout;
    use std::path::PathBuf;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("archgraph").chain(args.iter().copied()))
            .unwrap_or_else(|e| panic!("failed to parse {args:?}: {e}"))
    }

    #[test]
    fn test_defaults_render_everything_as_svg() {
        let cli = parse(&[]);
        assert_eq!(cli.target, None);
        assert_eq!(cli.render.format, "svg");
        assert_eq!(cli.render.output_dir, PathBuf::from("output"));
        assert_eq!(cli.render.layout, Layout::Dot);
        assert!(!cli.render.keep_source);
        assert!(!cli.render.strict);
        assert!(!cli.dot);
    }

    #[test]
    fn test_diagram_subcommand_with_options() {
        let cli = parse(&[
            "deployment-railway",
            "--format",
            "png",
            "--output-dir",
            "docs/diagrams",
            "--layout",
            "neato",
            "--strict",
        ]);
        assert_eq!(cli.target, Some(Target::Diagram(Diagram::DeploymentRailway)));
        assert_eq!(cli.render.format, "png");
        assert_eq!(cli.render.output_dir, PathBuf::from("docs/diagrams"));
        assert_eq!(cli.render.layout, Layout::Neato);
        assert!(cli.render.strict);
    }

    #[test]
    fn test_every_diagram_is_a_subcommand() {
        for diagram in Diagram::all() {
            let name = diagram.to_string();
            let cli = parse(&[name.as_str()]);
            assert_eq!(cli.target, Some(Target::Diagram(diagram)));
        }
    }

    #[test]
    fn test_all_and_list() {
        assert_eq!(parse(&["all"]).target, Some(Target::All));
        assert_eq!(parse(&["list"]).target, Some(Target::List));
        assert_eq!(Target::All.diagrams().len(), Diagram::all().count());
        assert!(Target::List.diagrams().is_empty());
    }

    #[test]
    fn test_unknown_layout_is_rejected() {
        let result = Cli::try_parse_from(["archgraph", "--layout", "spring"]);
        assert!(result.is_err());
    }
}

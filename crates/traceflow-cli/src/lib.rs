//! CLI logic for the Traceflow renderer.
//!
//! Reads a TOML flowchart document, renders it with the configured theme
//! and writes the SVG to disk.

pub mod error_adapter;

mod args;
mod config;
mod error;

pub use args::Args;
pub use error::CliError;

use std::fs;

use log::{debug, info};

use traceflow::{DiagramBuilder, graph::Document};

/// Run the Traceflow CLI application
///
/// This function processes the input file through the Traceflow pipeline
/// and writes the resulting SVG to the output file.
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Document parsing errors
/// - Theme resolution errors
/// - Layout errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing diagram"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let app_config = config::with_overrides(app_config, args.theme.as_deref(), args.mode);

    let source = fs::read_to_string(&args.input)?;
    let document = parse_document(&args.input, source)?;

    let builder = DiagramBuilder::with_builtin_themes(app_config)?;
    let svg = builder.render_svg(&document)?;

    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}

/// Parse a flowchart document from TOML `source` read from `path`.
///
/// # Errors
///
/// Returns [`CliError::Document`] carrying `source` when the TOML is
/// malformed or does not describe a document.
pub fn parse_document(path: &str, source: String) -> Result<Document, CliError> {
    match toml::from_str::<Document>(&source) {
        Ok(document) => {
            debug!(
                nodes = document.nodes().len(),
                edges = document.edges().len(),
                direction:% = document.direction();
                "Document parsed"
            );
            Ok(document)
        }
        Err(err) => Err(CliError::Document {
            path: path.to_string(),
            src: source,
            err,
        }),
    }
}

#[cfg(test)]
mod tests {
    use traceflow::graph::{Direction, NodeType};

    use super::*;

    #[test]
    fn test_parse_document() {
        let document = parse_document(
            "flow.toml",
            r#"
            direction = "LR"
            title = "Deploy"

            [[nodes]]
            id = "build"
            label = "Build"
            type = "start"

            [[nodes]]
            id = "ship"
            label = "Ship"
            type = "end"

            [[edges]]
            from = "build"
            to = "ship"
            "#
            .to_string(),
        )
        .unwrap();

        assert_eq!(document.direction(), Direction::LeftRight);
        assert_eq!(document.title(), Some("Deploy"));
        assert_eq!(document.nodes()[0].node_type(), NodeType::Start);
        assert_eq!(document.edges().len(), 1);
    }

    #[test]
    fn test_parse_document_error_keeps_source() {
        let source = "[[nodes]]\nid = \"a\"\nlabel = 3\n".to_string();
        match parse_document("bad.toml", source.clone()) {
            Err(CliError::Document { path, src, err }) => {
                assert_eq!(path, "bad.toml");
                assert_eq!(src, source);
                assert!(err.span().is_some());
            }
            other => panic!("Expected document error, got {other:?}"),
        }
    }
}

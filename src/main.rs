mod app;

use std::path::PathBuf;

use anyhow::anyhow;
use bionet_explorer::{ExplorerConfig, LayoutConfig, PolicyKind, SourceFormat};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use app::{BioNetApp, LoadRequest};

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum FormatArg {
    /// Pick by file extension.
    #[default]
    Auto,
    Document,
    Table,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum FilterArg {
    #[default]
    Scale,
    Category,
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Graph document (.json) or cross-reference table (.csv, .tsv).
    input: PathBuf,

    #[arg(long, value_enum, default_value_t = FormatArg::Auto)]
    format: FormatArg,

    /// `id,category` table used to tag cross-reference entities.
    #[arg(long)]
    categories: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = FilterArg::Scale)]
    filter: FilterArg,

    /// Layout viewport width.
    #[arg(long, default_value_t = 1600.0)]
    width: f32,

    /// Layout viewport height.
    #[arg(long, default_value_t = 900.0)]
    height: f32,

    /// Many-body strength; negative values repel.
    #[arg(long, default_value_t = -300.0, allow_negative_numbers = true)]
    charge: f32,

    #[arg(long, default_value_t = 30.0)]
    link_distance: f32,
}

impl Args {
    fn source_format(&self) -> Option<SourceFormat> {
        match self.format {
            FormatArg::Auto => None,
            FormatArg::Document => Some(SourceFormat::Document),
            FormatArg::Table => Some(
                SourceFormat::from_path(&self.input)
                    .filter(|format| matches!(format, SourceFormat::Table { .. }))
                    .unwrap_or(SourceFormat::Table { delimiter: b',' }),
            ),
        }
    }

    fn explorer_config(&self) -> ExplorerConfig {
        let layout = LayoutConfig {
            charge_strength: self.charge,
            link_distance: self.link_distance,
            ..LayoutConfig::default().with_viewport(self.width, self.height)
        };
        let policy = match self.filter {
            FilterArg::Scale => PolicyKind::Scale,
            FilterArg::Category => PolicyKind::Category,
        };
        ExplorerConfig { layout, policy }
    }

    fn load_request(&self) -> LoadRequest {
        LoadRequest {
            input: self.input.clone(),
            format: self.source_format(),
            categories: self.categories.clone(),
            config: self.explorer_config(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let request = args.load_request();
    tracing::info!(input = %request.input.display(), "starting viewer");

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "bionet-explorer",
        options,
        Box::new(move |cc| Ok(Box::new(BioNetApp::new(cc, request)))),
    )
    .map_err(|error| anyhow!("viewer exited with an error: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_layout_defaults() {
        let args = Args::try_parse_from(["bionet-explorer", "pd.json"]).unwrap();
        let config = args.explorer_config();

        assert_eq!(config.layout, LayoutConfig::default());
        assert_eq!(config.policy, PolicyKind::Scale);
        assert_eq!(args.source_format(), None);
    }

    #[test]
    fn flags_map_onto_configuration() {
        let args = Args::try_parse_from([
            "bionet-explorer",
            "cross.tsv",
            "--format",
            "table",
            "--filter",
            "category",
            "--charge",
            "-120",
            "--width",
            "800",
        ])
        .unwrap();
        let config = args.explorer_config();

        assert_eq!(config.layout.charge_strength, -120.0);
        assert_eq!(config.layout.center().x, 400.0);
        assert_eq!(config.policy, PolicyKind::Category);
        assert_eq!(
            args.source_format(),
            Some(SourceFormat::Table { delimiter: b'\t' })
        );
    }
}

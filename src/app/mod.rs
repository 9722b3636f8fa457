use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use anyhow::Context as _;
use bionet_explorer::{
    CategoryLookup, Element, Explorer, ExplorerConfig, FilterCriteria, GraphModel, NodeIndex,
    PolicyKind, ScaleSelection, SourceFormat, TickFrame, ViewTransform, load_graph,
};
use eframe::egui::{self, Context};
use tracing::{info, warn};

mod graph;
mod render_utils;
mod ui;

/// What the background loader reads and how the session is configured.
#[derive(Clone, Debug)]
pub struct LoadRequest {
    pub input: PathBuf,
    pub format: Option<SourceFormat>,
    pub categories: Option<PathBuf>,
    pub config: ExplorerConfig,
}

pub struct BioNetApp {
    request: LoadRequest,
    state: AppState,
    reload_rx: Option<Receiver<LoadedGraph>>,
}

enum AppState {
    Loading { rx: Receiver<LoadedGraph> },
    Ready(Box<ViewModel>),
}

/// A graph plus the quiet error shown when loading fell back to empty.
struct LoadedGraph {
    graph: GraphModel,
    error: Option<String>,
}

struct ViewModel {
    explorer: Explorer,
    /// Positions from the latest layout tick; the canvas draws from this.
    frame: TickFrame,
    categories: Vec<String>,
    scales: Vec<String>,
    source: String,
    load_error: Option<String>,
    config: ExplorerConfig,
    view: ViewTransform,
    live_physics: bool,
    search: String,
    search_match_cache: Option<SearchMatchCache>,
    scale_choice: ScaleSelection,
    show_connected: bool,
    active_categories: BTreeSet<String>,
    pointer: PointerState,
}

struct SearchMatchCache {
    query: String,
    matches: Arc<HashSet<NodeIndex>>,
}

/// Pointer bookkeeping needed to turn egui responses into explorer hooks.
#[derive(Default)]
struct PointerState {
    hovered: Option<Element>,
    dragging: Option<NodeIndex>,
}

impl BioNetApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, request: LoadRequest) -> Self {
        let state = Self::start_load(request.clone());
        Self {
            request,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(request: LoadRequest) -> Receiver<LoadedGraph> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let loaded = match collect_graph(&request) {
                Ok(graph) => LoadedGraph { graph, error: None },
                Err(error) => {
                    warn!("falling back to an empty graph: {error:#}");
                    LoadedGraph {
                        graph: GraphModel::empty(),
                        error: Some(format!("{error:#}")),
                    }
                }
            };
            let _ = tx.send(loaded);
        });

        rx
    }

    fn start_load(request: LoadRequest) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(request),
        }
    }

    fn ready(&self, loaded: LoadedGraph) -> AppState {
        AppState::Ready(Box::new(ViewModel::new(loaded, &self.request)))
    }
}

fn read_lookup(path: &Path) -> anyhow::Result<CategoryLookup> {
    let lookup = CategoryLookup::from_path(path)
        .with_context(|| format!("failed to read category table {}", path.display()))?;
    info!(path = %path.display(), entries = lookup.len(), "category table loaded");
    Ok(lookup)
}

fn collect_graph(request: &LoadRequest) -> anyhow::Result<GraphModel> {
    let lookup = match request.categories.as_deref().map(read_lookup) {
        Some(Ok(lookup)) => lookup,
        Some(Err(error)) => {
            warn!("continuing without category table: {error:#}");
            CategoryLookup::default()
        }
        None => CategoryLookup::default(),
    };

    load_graph(&request.input, request.format, &lookup)
        .with_context(|| format!("failed to load {}", request.input.display()))
}

impl eframe::App for BioNetApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(loaded) => transition = Some(loaded),
                    Err(TryRecvError::Empty) => ctx.request_repaint(),
                    Err(TryRecvError::Disconnected) => {
                        transition = Some(LoadedGraph {
                            graph: GraphModel::empty(),
                            error: Some("background loader disconnected".to_owned()),
                        });
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading(format!("Loading {}...", self.request.input.display()));
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.request.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(loaded) => transition = Some(loaded),
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                            ctx.request_repaint();
                        }
                        Err(TryRecvError::Disconnected) => {
                            warn!("background loader disconnected");
                        }
                    }
                }
            }
        }

        if let Some(loaded) = transition {
            self.reload_rx = None;
            self.state = self.ready(loaded);
        }
    }
}

impl ViewModel {
    fn new(loaded: LoadedGraph, request: &LoadRequest) -> Self {
        let config = request.config;
        let explorer = Explorer::new(loaded.graph, config);
        let active_categories = FilterCriteria::all(explorer.graph()).categories;

        Self {
            frame: explorer.frame(),
            categories: explorer.categories(),
            scales: explorer.scales(),
            source: request.input.display().to_string(),
            load_error: loaded.error,
            view: ViewTransform::focused_on(config.layout.center()),
            live_physics: true,
            search: String::new(),
            search_match_cache: None,
            scale_choice: ScaleSelection::All,
            show_connected: false,
            active_categories,
            pointer: PointerState::default(),
            config,
            explorer,
        }
    }

    /// Filter criteria assembled from the control panel for the configured
    /// policy.
    fn criteria(&self) -> FilterCriteria {
        match self.config.policy {
            PolicyKind::Scale => FilterCriteria {
                scale: self.scale_choice.clone(),
                show_connected: self.show_connected,
                ..FilterCriteria::default()
            },
            PolicyKind::Category => FilterCriteria::categories(self.active_categories.iter().cloned()),
        }
    }

    fn apply_filter(&mut self) {
        let criteria = self.criteria();
        self.explorer.set_filter(criteria);
    }
}

#[cfg(test)]
mod tests {
    use bionet_explorer::RawNode;

    use super::*;

    #[test]
    fn filter_choices_are_collected_once_on_load() {
        let graph = GraphModel::build(
            vec![
                RawNode::new("SNCA").with_scale("molecular").with_category("protein"),
                RawNode::new("Tremor").with_scale("clinical").with_category("clinical_symptom"),
            ],
            Vec::new(),
        );
        let request = LoadRequest {
            input: "pd.json".into(),
            format: None,
            categories: None,
            config: ExplorerConfig::default(),
        };
        let model = ViewModel::new(LoadedGraph { graph, error: None }, &request);

        assert_eq!(model.scales, vec!["clinical", "molecular"]);
        assert_eq!(model.categories, vec!["protein", "clinical_symptom"]);
        assert_eq!(model.frame.nodes.len(), 2);
        assert_eq!(model.active_categories.len(), 2);
    }
}

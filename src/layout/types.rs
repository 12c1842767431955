//! Types shared by the layout pipeline: diagram nodes and edges, flow
//! direction, and spacing configuration.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::concept::Concept;

/// Flow direction of the diagram's rank axis.
///
/// Ranks advance left-to-right or top-to-bottom; the in-rank axis is the
/// perpendicular one. Parsing accepts the short forms used by the exchange
/// layer (`"LR"`, `"TB"`) as well as spelled-out names.
///
/// # Examples
///
/// ```
/// use loregraph::layout::Direction;
///
/// assert_eq!(Direction::parse("LR"), Direction::LeftToRight);
/// assert_eq!(Direction::parse("top_to_bottom"), Direction::TopToBottom);
/// // Unknown inputs fall back to the default.
/// assert_eq!(Direction::parse("sideways"), Direction::LeftToRight);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Ranks advance along the x axis.
    #[default]
    LeftToRight,
    /// Ranks advance along the y axis.
    TopToBottom,
}

impl Direction {
    /// Parses a direction string, falling back to [`Direction::LeftToRight`]
    /// for unrecognized input.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "TB" | "TOP_TO_BOTTOM" | "TOP-TO-BOTTOM" | "VERTICAL" => Direction::TopToBottom,
            _ => Direction::LeftToRight,
        }
    }

    /// Short wire form: `"LR"` or `"TB"`.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::LeftToRight => "LR",
            Direction::TopToBottom => "TB",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Direction {
    fn from(s: &str) -> Self {
        Direction::parse(s)
    }
}

/// Spacing and box-size configuration for the layered layout.
///
/// Every node gets the same bounding box; proxies included, so the rank
/// and ordering phases treat them uniformly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Width of every node box.
    pub node_width: f64,
    /// Height of every node box.
    pub node_height: f64,
    /// Gap between neighboring nodes within a rank.
    pub node_spacing: f64,
    /// Gap between consecutive ranks.
    pub rank_spacing: f64,
    /// Maximum barycenter ordering sweeps before settling.
    pub max_ordering_sweeps: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 260.0,
            node_height: 60.0,
            node_spacing: 40.0,
            rank_spacing: 80.0,
            max_ordering_sweeps: 8,
        }
    }
}

impl LayoutConfig {
    /// Overrides the node box size.
    #[must_use]
    pub fn with_node_size(mut self, width: f64, height: f64) -> Self {
        self.node_width = width;
        self.node_height = height;
        self
    }

    /// Overrides the in-rank and between-rank spacing.
    #[must_use]
    pub fn with_spacing(mut self, node_spacing: f64, rank_spacing: f64) -> Self {
        self.node_spacing = node_spacing;
        self.rank_spacing = rank_spacing;
        self
    }
}

/// Derives the stable node id for a concept title.
///
/// Identity is the title itself: the function is pure and injective over
/// titles, so distinct titles never collide, while duplicate titles
/// deliberately collapse onto one node (the model's documented identity
/// rule).
#[must_use]
pub fn node_id(title: &str) -> String {
    title.to_string()
}

/// Derives the stable edge id from a kind and its ordered endpoints.
#[must_use]
pub fn edge_id(kind: EdgeKind, source: &str, target: &str) -> String {
    format!("{}:{source}->{target}", kind.id_prefix())
}

/// A positioned diagram node.
///
/// `x`/`y` follow top-left convention (the layered pass computes box
/// centers and translates by half the box dimensions). `concept` points
/// back at the source concept and is `None` for label-only proxy nodes
/// synthesized for unresolved `related` targets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiagramNode {
    /// Stable id derived from the title via [`node_id`].
    pub id: String,
    /// Display label.
    pub label: String,
    /// Left edge of the node box.
    pub x: f64,
    /// Top edge of the node box.
    pub y: f64,
    /// Box width (uniform across the pass).
    pub width: f64,
    /// Box height (uniform across the pass).
    pub height: f64,
    /// Source concept; `None` for proxy nodes.
    pub concept: Option<Arc<Concept>>,
}

impl DiagramNode {
    /// `true` for label-only proxies synthesized from `related` targets.
    #[must_use]
    pub fn is_proxy(&self) -> bool {
        self.concept.is_none()
    }
}

/// Distinguishes the two edge relations in a diagram.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Parent owns child through `consist_of`.
    Containment,
    /// Named cross-reference through `related`.
    Relation,
}

impl EdgeKind {
    fn id_prefix(&self) -> &'static str {
        match self {
            EdgeKind::Containment => "contain",
            EdgeKind::Relation => "relate",
        }
    }
}

/// Stroke metadata a rendering surface needs to tell the edge kinds apart.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeStyle {
    /// Dash the stroke.
    pub dashed: bool,
    /// Draw an arrowhead at the target end.
    pub arrowhead: bool,
    /// Stroke width in pixels.
    pub stroke_width: f64,
}

impl EdgeStyle {
    /// The canonical style for an edge kind: containment is solid with an
    /// arrowhead, relation is dashed, thin, and arrowless.
    #[must_use]
    pub fn for_kind(kind: EdgeKind) -> Self {
        match kind {
            EdgeKind::Containment => Self {
                dashed: false,
                arrowhead: true,
                stroke_width: 1.6,
            },
            EdgeKind::Relation => Self {
                dashed: true,
                arrowhead: false,
                stroke_width: 1.0,
            },
        }
    }
}

/// A styled, directed diagram edge between two node ids of the same pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiagramEdge {
    /// Stable id derived via [`edge_id`].
    pub id: String,
    /// Source node id.
    pub source: String,
    /// Target node id.
    pub target: String,
    /// Relation carried by this edge.
    pub kind: EdgeKind,
    /// Stroke metadata for the rendering surface.
    pub style: EdgeStyle,
}

impl DiagramEdge {
    /// Builds an edge of the given kind with its canonical id and style.
    #[must_use]
    pub fn new(kind: EdgeKind, source: impl Into<String>, target: impl Into<String>) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: edge_id(kind, &source, &target),
            source,
            target,
            kind,
            style: EdgeStyle::for_kind(kind),
        }
    }
}

/// The output of one layout pass: positioned nodes and styled edges.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    /// One entry per unique node id, in first-visit order (proxies last).
    pub nodes: Vec<DiagramNode>,
    /// Deduplicated edges whose endpoints all exist in `nodes`.
    pub edges: Vec<DiagramEdge>,
}

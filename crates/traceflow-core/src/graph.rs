//! Graph document model.
//!
//! These types describe a flowchart after it has been parsed and validated:
//! every node id is unique and every edge references existing nodes. The
//! layout and export stages consume them read-only.
//!
//! # Organization
//!
//! - [`Node`] with its [`NodeType`], [`Emphasis`] and [`Status`]
//! - [`Edge`] with its [`EdgeStyle`]
//! - [`Direction`] - the primary flow direction of the diagram
//! - [`Document`] - the root type tying the graph to an optional theme

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde::Deserialize;

use crate::theme::ThemeSpec;

/// The kind of step a node represents. Decides its outline and default height.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Start,
    End,
    #[default]
    Process,
    Decision,
    Database,
    External,
    Manual,
    Delay,
}

impl NodeType {
    /// Returns the lowercase name used in documents and `data-type` attributes.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
            Self::Process => "process",
            Self::Decision => "decision",
            Self::Database => "database",
            Self::External => "external",
            Self::Manual => "manual",
            Self::Delay => "delay",
        }
    }
}

impl FromStr for NodeType {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "end" => Ok(Self::End),
            "process" => Ok(Self::Process),
            "decision" => Ok(Self::Decision),
            "database" => Ok(Self::Database),
            "external" => Ok(Self::External),
            "manual" => Ok(Self::Manual),
            "delay" => Ok(Self::Delay),
            _ => Err("Unsupported node type"),
        }
    }
}

impl Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Visual weight of a node.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emphasis {
    Low,
    #[default]
    Normal,
    High,
}

/// Outcome marker of a node, rendered through the accent status colors.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Default,
    Success,
    Warning,
    Error,
}

/// Line style of an edge.
///
/// Dashed and dotted edges mark decision branches and are routed around the
/// side of the diagram in vertical layouts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl EdgeStyle {
    /// Returns true for the dashed and dotted styles.
    pub fn is_branch(self) -> bool {
        matches!(self, Self::Dashed | Self::Dotted)
    }
}

/// Primary flow direction of a diagram.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Direction {
    /// Top to bottom (default)
    #[default]
    #[serde(rename = "TB")]
    TopBottom,
    /// Bottom to top
    #[serde(rename = "BT")]
    BottomTop,
    /// Left to right
    #[serde(rename = "LR")]
    LeftRight,
    /// Right to left
    #[serde(rename = "RL")]
    RightLeft,
}

impl Direction {
    /// Returns true for TB and BT.
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::TopBottom | Self::BottomTop)
    }

    /// Returns true when the flow runs against the axis (BT and RL).
    pub fn is_reversed(self) -> bool {
        matches!(self, Self::BottomTop | Self::RightLeft)
    }
}

impl FromStr for Direction {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TB" => Ok(Self::TopBottom),
            "BT" => Ok(Self::BottomTop),
            "LR" => Ok(Self::LeftRight),
            "RL" => Ok(Self::RightLeft),
            _ => Err("Unsupported direction"),
        }
    }
}

impl From<Direction> for &'static str {
    fn from(val: Direction) -> Self {
        match val {
            Direction::TopBottom => "TB",
            Direction::BottomTop => "BT",
            Direction::LeftRight => "LR",
            Direction::RightLeft => "RL",
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: &'static str = (*self).into();
        write!(f, "{s}")
    }
}

/// A single step of the flowchart.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Node {
    id: String,
    label: String,
    #[serde(rename = "type", default)]
    node_type: NodeType,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    emphasis: Emphasis,
    #[serde(default)]
    status: Status,
    #[serde(default)]
    icon: Option<String>,
}

impl Node {
    /// Create a node with normal emphasis and default status.
    pub fn new(id: impl Into<String>, label: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            node_type,
            description: None,
            emphasis: Emphasis::default(),
            status: Status::default(),
            icon: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_emphasis(mut self, emphasis: Emphasis) -> Self {
        self.emphasis = emphasis;
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Get the node identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn emphasis(&self) -> Emphasis {
        self.emphasis
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Icon name carried through from the document. Not rendered.
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// A directed connection between two nodes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Edge {
    from: String,
    to: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    style: EdgeStyle,
    #[serde(default)]
    animate: bool,
}

impl Edge {
    /// Create a solid, unlabeled edge between two node ids.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: None,
            description: None,
            style: EdgeStyle::default(),
            animate: false,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_style(mut self, style: EdgeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_animate(mut self, animate: bool) -> Self {
        self.animate = animate;
        self
    }

    /// Get the source node id of this edge.
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Get the target node id of this edge.
    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn style(&self) -> EdgeStyle {
        self.style
    }

    pub fn animate(&self) -> bool {
        self.animate
    }
}

/// A complete flowchart document.
///
/// # Fields
///
/// - `title` - Optional document title, rendered as the SVG `<title>`
/// - `description` - Optional free-form description, rendered as the SVG `<desc>`
/// - `theme` - Optional theme specification; absent means the default theme
/// - `direction` - Primary flow direction, `TB` when absent
/// - `nodes` / `edges` - The graph itself
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    theme: Option<ThemeSpec>,
    #[serde(default)]
    direction: Direction,
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    edges: Vec<Edge>,
}

impl Document {
    /// Create a new document without title or theme.
    pub fn new(direction: Direction, nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self {
            title: None,
            description: None,
            theme: None,
            direction,
            nodes,
            edges,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_theme(mut self, theme: ThemeSpec) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn theme(&self) -> Option<&ThemeSpec> {
        self.theme.as_ref()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

use glam::{Mat4, Quat, Vec3};

// ---------------------------------------------------------------------------
// NodeId
// ---------------------------------------------------------------------------

/// Handle to a node in a [`SceneGraph`](super::SceneGraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(super) u32);

impl NodeId {
    /// Raw numeric value, stable for the lifetime of the graph.
    #[must_use]
    pub fn raw(self) -> u32 {
        self.0
    }
}

// ---------------------------------------------------------------------------
// Transform
// ---------------------------------------------------------------------------

/// Local translation / rotation / scale relative to the parent node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Offset from the parent origin.
    pub translation: Vec3,
    /// Orientation relative to the parent.
    pub rotation: Quat,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// No translation, no rotation, unit scale.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Identity transform moved to `translation`.
    #[must_use]
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Builder-style uniform scale.
    #[must_use]
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    /// Local-to-parent matrix (scale, then rotate, then translate).
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            self.rotation,
            self.translation,
        )
    }
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// What a node represents. The graph itself only cares about transforms;
/// the kind is carried for whoever renders the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Pure transform grouping.
    Group,
    /// Massless pivot the suspended load hangs from.
    Anchor,
    /// An imported model; `source` is the asset path it came from.
    Model {
        /// Asset path.
        source: String,
    },
    /// Sky-filling ambient light between a sky and a ground color.
    HemisphereLight {
        /// Light intensity.
        intensity: f32,
    },
    /// Parallel light shining from the node position toward the origin.
    DirectionalLight {
        /// Light intensity.
        intensity: f32,
    },
    /// Ground reference grid.
    Grid {
        /// Edge length.
        size: f32,
        /// Lines per edge.
        divisions: u32,
    },
    /// Cube-map background.
    Skybox {
        /// Face images in +x, -x, +y, -y, +z, -z order.
        faces: [String; 6],
    },
}

/// A named node in the scene hierarchy.
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique, human-readable name used for lookups.
    pub name: String,
    /// What the node represents.
    pub kind: NodeKind,
    /// Transform relative to the parent.
    pub transform: Transform,
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
}

impl Node {
    /// A detached node with an identity transform.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            transform: Transform::IDENTITY,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Builder-style transform override.
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Parent node, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Direct children in insertion order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

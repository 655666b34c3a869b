/// Detection task family requested from the external model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Oriented-bounding-box detection.
    Obb,
}

impl TaskKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskKind::Obb => "obb",
        }
    }
}

/// Identifies which texture atlas a graphic belongs to.
/// Index into the AssetManifest's atlas list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AtlasId(pub u32);

/// The current graphic of an entity: an atlas cell drawn at a given size.
///
/// Draw positions handed to the host are anchor-relative, so `width` and
/// `height` are the graphic's own extent in world units, before entity scale.
#[derive(Debug, Clone, PartialEq)]
pub struct Graphic {
    /// Which atlas this graphic belongs to.
    pub atlas: AtlasId,
    /// Column in the atlas grid.
    pub col: f32,
    /// Row in the atlas grid.
    pub row: f32,
    /// Width in world units.
    pub width: f32,
    /// Height in world units.
    pub height: f32,
    /// Hidden graphics draw neither a shadow nor themselves.
    pub visible: bool,
}

impl Graphic {
    pub fn new(atlas: AtlasId, col: f32, row: f32) -> Self {
        Self {
            atlas,
            col,
            row,
            ..Default::default()
        }
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

impl Default for Graphic {
    fn default() -> Self {
        Self {
            atlas: AtlasId(0),
            col: 0.0,
            row: 0.0,
            width: 64.0,
            height: 64.0,
            visible: true,
        }
    }
}

use image::RgbaImage;

/// Number of skybox faces.
pub const FACE_COUNT: usize = 6;

/// Edge length of a face canvas in pixels.
pub const CANVAS_SIZE: u32 = 512;

/// The six faces of the inner sky box, in material index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Back,
    Front,
    Top,
    Bottom,
    Left,
    Right,
}

impl Face {
    pub const ALL: [Face; FACE_COUNT] = [
        Face::Back,
        Face::Front,
        Face::Top,
        Face::Bottom,
        Face::Left,
        Face::Right,
    ];

    /// The four vertical faces, excluding top and bottom.
    pub const SIDES: [Face; 4] = [Face::Back, Face::Front, Face::Left, Face::Right];

    pub fn index(self) -> usize {
        match self {
            Face::Back => 0,
            Face::Front => 1,
            Face::Top => 2,
            Face::Bottom => 3,
            Face::Left => 4,
            Face::Right => 5,
        }
    }

    pub fn from_name(name: &str) -> Option<Face> {
        match name.to_ascii_lowercase().as_str() {
            "back" => Some(Face::Back),
            "front" => Some(Face::Front),
            "top" => Some(Face::Top),
            "bottom" => Some(Face::Bottom),
            "left" => Some(Face::Left),
            "right" => Some(Face::Right),
            _ => None,
        }
    }
}

/// Selects which faces a paint call touches.
///
/// Built from face values, slices, or name strings; unknown names
/// resolve to no faces at all rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FaceSelector {
    All,
    Sides,
    One(Face),
    Set(Vec<Face>),
}

impl FaceSelector {
    /// Concrete faces in paint order.
    pub fn resolve(&self) -> Vec<Face> {
        match self {
            FaceSelector::All => Face::ALL.to_vec(),
            FaceSelector::Sides => Face::SIDES.to_vec(),
            FaceSelector::One(face) => vec![*face],
            FaceSelector::Set(faces) => faces.clone(),
        }
    }
}

impl From<Face> for FaceSelector {
    fn from(face: Face) -> Self {
        FaceSelector::One(face)
    }
}

impl From<&[Face]> for FaceSelector {
    fn from(faces: &[Face]) -> Self {
        FaceSelector::Set(faces.to_vec())
    }
}

impl From<Vec<Face>> for FaceSelector {
    fn from(faces: Vec<Face>) -> Self {
        FaceSelector::Set(faces)
    }
}

impl From<&str> for FaceSelector {
    fn from(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "all" => FaceSelector::All,
            "sides" => FaceSelector::Sides,
            other => match Face::from_name(other) {
                Some(face) => FaceSelector::One(face),
                // unknown names are silently skipped
                None => FaceSelector::Set(Vec::new()),
            },
        }
    }
}

/// CPU-side paintable surface bound to one inner face material.
///
/// Painting happens on the RGBA buffer here; the host re-uploads the
/// pixels to its material whenever the dirty flag is raised. Opacity
/// and transparency mirror the material settings the host applies on
/// upload.
pub struct FaceCanvas {
    image: RgbaImage,
    pub opacity: f32,
    pub transparent: bool,
    dirty: bool,
}

impl FaceCanvas {
    pub fn new(size: u32) -> Self {
        Self {
            image: RgbaImage::new(size, size),
            opacity: 1.0,
            transparent: false,
            dirty: false,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.image
    }

    /// Erase every pixel back to transparent black.
    pub fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            pixel.0 = [0, 0, 0, 0];
        }
    }

    /// Source-over blend a single pixel; out-of-bounds writes are
    /// dropped.
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) {
        if x >= self.image.width() || y >= self.image.height() {
            return;
        }
        let dst = self.image.get_pixel_mut(x, y);
        let alpha = color[3] as f32 / 255.0;
        for i in 0..3 {
            dst.0[i] = (color[i] as f32 * alpha + dst.0[i] as f32 * (1.0 - alpha)) as u8;
        }
        dst.0[3] = dst.0[3].max(color[3]);
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Read and reset the dirty flag; true means the host should
    /// re-upload this surface.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }
}

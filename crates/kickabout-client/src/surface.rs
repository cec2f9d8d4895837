/// Where frames are drawn. The host owns the real canvas or window; the
/// session only needs its container size and a way to resize and free it.
pub trait RenderSurface {
    /// Size of the element the surface fills, or `None` if it is gone.
    fn container_size(&self) -> Option<(u32, u32)>;
    /// Resize the render target.
    fn set_size(&mut self, width: u32, height: u32);
    /// Free GPU resources. Called once on dispose.
    fn release(&mut self);
}

/// Surface with no backing renderer, for the headless binary and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlessSurface {
    container: Option<(u32, u32)>,
    size: (u32, u32),
    resizes: u32,
    released: bool,
}

impl HeadlessSurface {
    pub fn new(container: Option<(u32, u32)>) -> Self {
        Self {
            container,
            ..Self::default()
        }
    }

    /// Simulate the container changing size or being removed.
    pub fn set_container(&mut self, container: Option<(u32, u32)>) {
        self.container = container;
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn resize_count(&self) -> u32 {
        self.resizes
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl RenderSurface for HeadlessSurface {
    fn container_size(&self) -> Option<(u32, u32)> {
        self.container
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.resizes += 1;
    }

    fn release(&mut self) {
        self.released = true;
    }
}

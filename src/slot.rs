pub trait Release {
    fn release(self);
}

/// Holds at most one mesh. The old one is released before the new one is
/// installed.
pub struct MeshSlot<T: Release> {
    current: Option<T>,
}

impl<T: Release> Default for MeshSlot<T> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<T: Release> MeshSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<&T> {
        self.current.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    pub fn replace(&mut self, mesh: T) {
        if let Some(old) = self.current.take() {
            old.release();
        }
        self.current = Some(mesh);
    }

    pub fn clear(&mut self) {
        if let Some(old) = self.current.take() {
            old.release();
        }
    }
}

impl<T: Release> Drop for MeshSlot<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

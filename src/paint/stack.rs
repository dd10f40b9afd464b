use std::ops::ControlFlow;

use crate::foundation::error::{PixelGridError, PixelGridResult};
use crate::paint::color::{ColorLayer, Rgba};

/// Ordered color layers of one cell plus the cached composite shown on screen.
///
/// Index 0 is the permanent bottom layer. Mutations go through the "current" layer
/// selected with [`LayerStack::switch_layer`]; every mutation refreshes
/// [`LayerStack::computed_color`].
#[derive(Clone, Debug, PartialEq)]
pub struct LayerStack {
    layers: Vec<ColorLayer>,
    current: usize,
    computed: Rgba,
}

impl Default for LayerStack {
    fn default() -> Self {
        Self::new(ColorLayer::default())
    }
}

impl LayerStack {
    /// Stack with a single bottom layer.
    pub fn new(bottom: ColorLayer) -> Self {
        let mut stack = Self {
            layers: vec![bottom],
            current: 0,
            computed: bottom.color(),
        };
        stack.recompute_composite();
        stack
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn layer(&self, index: usize) -> Option<&ColorLayer> {
        self.layers.get(index)
    }

    pub fn current_layer(&self) -> &ColorLayer {
        &self.layers[self.current]
    }

    pub fn bottom_layer(&self) -> &ColorLayer {
        &self.layers[0]
    }

    pub fn top_layer(&self) -> &ColorLayer {
        &self.layers[self.layers.len() - 1]
    }

    /// Select the layer that `color`/`set_color` operate on; returns the previous index.
    ///
    /// Callers restore the returned index once done, or use [`LayerStack::with_layer`].
    pub fn switch_layer(&mut self, index: usize) -> PixelGridResult<usize> {
        if index >= self.layers.len() {
            return Err(PixelGridError::IndexOutOfRange {
                index,
                len: self.layers.len(),
            });
        }
        Ok(std::mem::replace(&mut self.current, index))
    }

    /// Run `f` on layer `index` without moving the cursor, then recompute the composite.
    pub fn with_layer<R>(
        &mut self,
        index: usize,
        f: impl FnOnce(&mut ColorLayer) -> R,
    ) -> PixelGridResult<R> {
        let prev = self.switch_layer(index)?;
        let out = f(&mut self.layers[self.current]);
        self.current = prev;
        self.recompute_composite();
        Ok(out)
    }

    /// Color of the current layer (not the composite).
    pub fn color(&self) -> Rgba {
        self.current_layer().color()
    }

    /// Overwrite the current layer's color.
    pub fn set_color(&mut self, rgba: Rgba) {
        self.layers[self.current].set_rgba(rgba);
        self.recompute_composite();
    }

    /// Cached composite of all layers.
    pub fn computed_color(&self) -> Rgba {
        self.computed
    }

    /// Insert a transparent layer right above the current one and return its index.
    pub fn push_layer(&mut self, set_as_current: bool) -> usize {
        let at = self.current + 1;
        self.layers.insert(at, ColorLayer::transparent());
        if set_as_current {
            self.current = at;
        }
        self.recompute_composite();
        at
    }

    /// Remove the current layer. The bottom layer is never removed.
    pub fn pop_layer(&mut self) -> Option<ColorLayer> {
        if self.current == 0 {
            return None;
        }
        let popped = self.layers.remove(self.current);
        if self.current == self.layers.len() {
            self.current -= 1;
        }
        self.recompute_composite();
        Some(popped)
    }

    /// Drop everything above the bottom layer.
    pub fn clear_layers(&mut self) {
        self.layers.truncate(1);
        self.current = 0;
        self.recompute_composite();
    }

    /// Visit layers bottom-up, or top-down when `top_down` is set, until the visitor breaks.
    pub fn traverse_layers(
        &self,
        top_down: bool,
        mut visit: impl FnMut(usize, &ColorLayer) -> ControlFlow<()>,
    ) {
        let order: Box<dyn Iterator<Item = (usize, &ColorLayer)>> = if top_down {
            Box::new(self.layers.iter().enumerate().rev())
        } else {
            Box::new(self.layers.iter().enumerate())
        };
        for (i, layer) in order {
            if visit(i, layer).is_break() {
                return;
            }
        }
    }

    /// Fold all layers bottom-to-top with [`ColorLayer::merge_over`] into the cached composite.
    pub fn recompute_composite(&mut self) {
        let mut merged = self.layers[0];
        for layer in &self.layers[1..] {
            merged.merge_over(layer);
        }
        self.computed = merged.color();
    }

    /// Make this stack hold the same layer colors as `other`.
    ///
    /// Missing layers are pushed on top and surplus layers popped from the top, so the
    /// bottom layer survives; the cursor is kept when still in range.
    pub fn copy_layers_from(&mut self, other: &LayerStack) {
        let cursor = self.current;
        while self.layers.len() < other.layers.len() {
            self.current = self.layers.len() - 1;
            self.push_layer(false);
        }
        while self.layers.len() > other.layers.len() {
            self.current = self.layers.len() - 1;
            self.pop_layer();
        }
        self.layers.copy_from_slice(&other.layers);
        self.current = cursor.min(self.layers.len() - 1);
        self.recompute_composite();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/paint/stack.rs"]
mod tests;

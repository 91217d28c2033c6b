//! Channel buffers: named 2D sample grids composing the framebuffer

use std::collections::TryReserveError;

use crate::types::Color;

/// The fixed set of channel purposes. Channels are stored as struct fields
/// (O(1) access), never looked up by name at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    Color,
    Depth,
    Normal,
}

impl ChannelKind {
    pub fn name(self) -> &'static str {
        match self {
            ChannelKind::Color => "color",
            ChannelKind::Depth => "depth",
            ChannelKind::Normal => "normal",
        }
    }
}

/// Error raised when a channel's backing memory cannot be obtained
#[derive(Debug)]
pub struct ChannelError {
    pub kind: ChannelKind,
    pub requested: usize,
    pub source: TryReserveError,
}

impl std::fmt::Display for ChannelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "failed to allocate {} samples for the {} channel: {}",
            self.requested,
            self.kind.name(),
            self.source
        )
    }
}

impl std::error::Error for ChannelError {}

/// A width x height grid of samples of one type, owning its backing memory.
///
/// Lifecycle: allocate -> clear -> read/write during a frame -> reallocate on
/// resize. Out-of-range reads return None and out-of-range writes are no-ops.
#[derive(Debug, Clone)]
pub struct Channel<T: Copy> {
    kind: ChannelKind,
    width: usize,
    height: usize,
    clear_value: T,
    samples: Vec<T>,
}

impl<T: Copy> Channel<T> {
    /// Allocate a channel, surfacing allocation failure instead of aborting
    pub fn with_size(
        kind: ChannelKind,
        width: usize,
        height: usize,
        clear_value: T,
    ) -> Result<Self, ChannelError> {
        let mut channel = Channel {
            kind,
            width: 0,
            height: 0,
            clear_value,
            samples: Vec::new(),
        };
        channel.allocate(width, height)?;
        Ok(channel)
    }

    /// (Re)allocate backing memory for the given dimensions and clear it.
    /// The new store is built before the old one is dropped, so on failure
    /// the previous valid buffer stays intact.
    pub fn allocate(&mut self, width: usize, height: usize) -> Result<(), ChannelError> {
        let len = width * height;
        let mut samples: Vec<T> = Vec::new();
        samples.try_reserve_exact(len).map_err(|source| ChannelError {
            kind: self.kind,
            requested: len,
            source,
        })?;
        samples.resize(len, self.clear_value);

        self.samples = samples;
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Reset every sample to the channel's clear value
    pub fn clear(&mut self) {
        self.samples.fill(self.clear_value);
    }

    pub fn kind(&self) -> ChannelKind {
        self.kind
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear_value(&self) -> T {
        self.clear_value
    }

    /// Change the value `clear` resets samples to (the depth channel tracks
    /// the camera's far clip)
    pub fn set_clear_value(&mut self, value: T) {
        self.clear_value = value;
    }

    pub fn get(&self, x: i32, y: i32) -> Option<T> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(self.samples[y as usize * self.width + x as usize])
    }

    pub fn set(&mut self, x: i32, y: i32, value: T) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        self.samples[y as usize * self.width + x as usize] = value;
    }

    pub fn samples(&self) -> &[T] {
        &self.samples
    }
}

impl Channel<Color> {
    /// Zero-copy view of the color samples as raw RGBA8 bytes, row-major
    pub fn bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.samples)
    }
}

//! Persistent aligned uniform upload buffer.
//!
//! Wraps a fixed-capacity GPU buffer whose elements are spaced at the
//! 256-byte uniform-offset alignment, so any element can back a uniform
//! bind group directly. Writes go through the queue each frame; the
//! buffer itself never reallocates.

use std::marker::PhantomData;

/// Minimum uniform buffer offset alignment guaranteed by the default
/// wgpu limits.
pub const UNIFORM_ALIGNMENT: u64 = 256;

/// Round `size` up to the next multiple of `alignment` (a power of two).
#[must_use]
pub fn align_up(size: u64, alignment: u64) -> u64 {
    debug_assert!(alignment.is_power_of_two());
    (size + alignment - 1) & !(alignment - 1)
}

/// Fixed-capacity uniform buffer holding `capacity` elements of `T`, each
/// padded out to [`UNIFORM_ALIGNMENT`].
pub struct UploadBuffer<T> {
    buffer: wgpu::Buffer,
    stride: u64,
    capacity: usize,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> UploadBuffer<T> {
    /// Allocate an upload buffer with room for `capacity` elements.
    #[must_use]
    pub fn new(device: &wgpu::Device, label: &str, capacity: usize) -> Self {
        let stride =
            align_up(size_of::<T>() as u64, UNIFORM_ALIGNMENT);
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: stride * capacity as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            buffer,
            stride,
            capacity,
            _marker: PhantomData,
        }
    }

    /// Write one element at `index`.
    pub fn copy_data(&self, queue: &wgpu::Queue, index: usize, data: &T) {
        debug_assert!(index < self.capacity, "upload index out of range");
        queue.write_buffer(
            &self.buffer,
            index as u64 * self.stride,
            bytemuck::bytes_of(data),
        );
    }

    /// Binding resource covering the element at `index`.
    #[must_use]
    pub fn binding(&self, index: usize) -> wgpu::BindingResource<'_> {
        debug_assert!(index < self.capacity, "binding index out of range");
        wgpu::BindingResource::Buffer(wgpu::BufferBinding {
            buffer: &self.buffer,
            offset: index as u64 * self.stride,
            size: wgpu::BufferSize::new(self.stride),
        })
    }

    /// The underlying GPU buffer.
    #[must_use]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Aligned per-element byte stride.
    #[must_use]
    pub fn stride(&self) -> u64 {
        self.stride
    }

    /// Number of elements the buffer holds.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_up_rounds_to_alignment_multiples() {
        assert_eq!(align_up(0, 256), 0);
        assert_eq!(align_up(1, 256), 256);
        assert_eq!(align_up(256, 256), 256);
        assert_eq!(align_up(257, 256), 512);
        assert_eq!(align_up(300, 256), 512);
        assert_eq!(align_up(512, 256), 512);
    }

    #[test]
    fn align_up_with_small_alignments() {
        assert_eq!(align_up(3, 4), 4);
        assert_eq!(align_up(17, 16), 32);
    }
}

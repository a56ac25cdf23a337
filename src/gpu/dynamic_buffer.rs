//! Growable GPU buffer for per-frame instance data.
//!
//! Capacity doubles when a write exceeds it; the buffer never shrinks
//! (GPU buffers cannot be resized in place).

use std::marker::PhantomData;

/// A typed GPU buffer that reallocates on demand.
pub struct DynamicBuffer<T> {
    buffer: wgpu::Buffer,
    capacity: usize,
    count: usize,
    usage: wgpu::BufferUsages,
    label: String,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> DynamicBuffer<T> {
    /// Buffer with room for `capacity` items.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> Self {
        let capacity = capacity.max(1);
        Self {
            buffer: Self::allocate(device, label, capacity, usage),
            capacity,
            count: 0,
            usage,
            label: label.to_owned(),
            _marker: PhantomData,
        }
    }

    fn allocate(
        device: &wgpu::Device,
        label: &str,
        capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (capacity * size_of::<T>()) as u64,
            usage: usage | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Replace the contents with `data`, growing if necessary.
    ///
    /// Returns `true` if the buffer was reallocated.
    pub fn write(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> bool {
        let reallocated = data.len() > self.capacity;
        if reallocated {
            self.capacity = (data.len() * 2).max(self.capacity * 2);
            self.buffer =
                Self::allocate(device, &self.label, self.capacity, self.usage);
            log::debug!(
                "{} grown to {} items",
                self.label,
                self.capacity
            );
        }
        if !data.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(data));
        }
        self.count = data.len();
        reallocated
    }

    /// The underlying buffer.
    #[must_use]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Items written by the last [`write`](Self::write).
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Items that fit without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

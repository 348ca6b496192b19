//! Typed GPU buffers with automatic resizing.
//!
//! Uses a 2x growth strategy when capacity is exceeded. Buffers never
//! shrink (GPU buffers cannot be resized in place).

use std::marker::PhantomData;

use wgpu::util::DeviceExt;

/// A GPU buffer of `T` items that grows on demand.
pub struct TypedBuffer<T> {
    buffer: wgpu::Buffer,
    /// Capacity in items.
    capacity: usize,
    /// Items written by the last upload.
    count: usize,
    usage: wgpu::BufferUsages,
    label: String,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> TypedBuffer<T> {
    /// Buffer initialized from existing data. An empty slice still
    /// allocates room for one item so bind groups stay valid.
    pub fn new_with_data(
        device: &wgpu::Device,
        label: &str,
        data: &[T],
        usage: wgpu::BufferUsages,
    ) -> Self {
        let zeroed = [T::zeroed()];
        let contents = if data.is_empty() { &zeroed[..] } else { data };

        let buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(contents),
                usage: usage | wgpu::BufferUsages::COPY_DST,
            });

        Self {
            buffer,
            capacity: contents.len(),
            count: data.len(),
            usage,
            label: label.to_owned(),
            _marker: PhantomData,
        }
    }

    /// Write data to buffer, growing if necessary.
    ///
    /// Returns `true` if the buffer was reallocated (bind groups need
    /// recreation).
    pub fn write(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> bool {
        let reallocated = if data.len() > self.capacity {
            let new_capacity = grown_capacity(self.capacity, data.len());
            self.buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&self.label),
                size: (new_capacity * size_of::<T>()) as u64,
                usage: self.usage | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            log::debug!(
                "{}: grew {} -> {} items",
                self.label,
                self.capacity,
                new_capacity
            );
            self.capacity = new_capacity;
            true
        } else {
            false
        };

        if !data.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(data));
        }
        self.count = data.len();
        reallocated
    }

    /// The underlying wgpu buffer.
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Items written by the last upload.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Capacity in items.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Capacity after growing to fit `needed` items: 2x, minimum +16.
fn grown_capacity(current: usize, needed: usize) -> usize {
    (needed * 2).max(current + 16)
}

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::error::{RenderError, Result};

/// Size of one `mat4x4<f32>` in bytes.
pub const MATRIX_SIZE: u64 = 64;

/// Size of the whole transform block in bytes.
pub const UNIFORM_BLOCK_SIZE: u64 = 3 * MATRIX_SIZE;

/// `UNIFORM_BLOCK_SIZE` as a binding size; rejected at compile time if zero.
const UNIFORM_BINDING_SIZE: wgpu::BufferSize = match wgpu::BufferSize::new(UNIFORM_BLOCK_SIZE) {
    Some(size) => size,
    None => panic!("uniform block size is zero"),
};

/// One matrix slot of the uniform block.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MatrixSlot {
    Model,
    View,
    Projection,
}

impl MatrixSlot {
    /// Slots in buffer order.
    pub const ALL: [MatrixSlot; 3] = [MatrixSlot::Model, MatrixSlot::View, MatrixSlot::Projection];

    pub const fn offset(self) -> u64 {
        match self {
            MatrixSlot::Model => 0,
            MatrixSlot::View => MATRIX_SIZE,
            MatrixSlot::Projection => 2 * MATRIX_SIZE,
        }
    }

    /// Validates a raw write against the slot layout.
    ///
    /// Only whole-matrix writes at a slot boundary are accepted.
    pub fn for_write(offset: u64, len: usize) -> Result<Self> {
        let slot = match offset {
            0 => MatrixSlot::Model,
            MATRIX_SIZE => MatrixSlot::View,
            o if o == 2 * MATRIX_SIZE => MatrixSlot::Projection,
            _ => return Err(RenderError::BufferContractViolation { offset, len }),
        };

        if len as u64 != MATRIX_SIZE {
            return Err(RenderError::BufferContractViolation { offset, len });
        }

        Ok(slot)
    }

    fn range(self) -> std::ops::Range<usize> {
        let start = self.offset() as usize;
        start..start + MATRIX_SIZE as usize
    }
}

/// CPU image of the transform uniform: three column-major 4x4 f32 matrices.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct UniformBlock {
    pub model: [f32; 16],
    pub view: [f32; 16],
    pub projection: [f32; 16],
}

impl UniformBlock {
    pub fn from_matrices(model: Mat4, view: Mat4, projection: Mat4) -> Self {
        Self {
            model: model.to_cols_array(),
            view: view.to_cols_array(),
            projection: projection.to_cols_array(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Bytes of a single slot, ready for `UniformBuffer::write`.
    pub fn slot_bytes(&self, slot: MatrixSlot) -> &[u8] {
        &self.as_bytes()[slot.range()]
    }

    pub fn matrix(&self, slot: MatrixSlot) -> Mat4 {
        let cols = match slot {
            MatrixSlot::Model => &self.model,
            MatrixSlot::View => &self.view,
            MatrixSlot::Projection => &self.projection,
        };
        Mat4::from_cols_array(cols)
    }

    /// Copies `bytes` into the slot at `offset`; rejected writes leave the block untouched.
    pub fn write(&mut self, offset: u64, bytes: &[u8]) -> Result<MatrixSlot> {
        let slot = MatrixSlot::for_write(offset, bytes.len())?;
        bytemuck::bytes_of_mut(self)[slot.range()].copy_from_slice(bytes);
        Ok(slot)
    }
}

/// Device buffer backing the transform uniform.
///
/// Keeps a CPU shadow of every accepted write so the current contents can be
/// read back without a GPU map.
pub struct UniformBuffer {
    buffer: wgpu::Buffer,
    shadow: UniformBlock,
}

impl UniformBuffer {
    pub fn new(device: &wgpu::Device) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("spindle transform ubo"),
            size: UNIFORM_BLOCK_SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            buffer,
            shadow: UniformBlock::zeroed(),
        }
    }

    /// Writes one matrix slot.
    ///
    /// `offset` must be 0, 64 or 128 and `bytes` exactly 64 long; anything
    /// else is a `BufferContractViolation` and nothing reaches the device.
    pub fn write(&mut self, queue: &wgpu::Queue, offset: u64, bytes: &[u8]) -> Result<()> {
        self.shadow.write(offset, bytes)?;
        queue.write_buffer(&self.buffer, offset, bytes);
        Ok(())
    }

    /// Writes all three slots in buffer order.
    pub fn write_block(&mut self, queue: &wgpu::Queue, block: &UniformBlock) -> Result<()> {
        for slot in MatrixSlot::ALL {
            self.write(queue, slot.offset(), block.slot_bytes(slot))?;
        }
        Ok(())
    }

    pub fn contents(&self) -> &UniformBlock {
        &self.shadow
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Minimum binding size for the bind-group layout entry.
    pub const fn binding_size() -> wgpu::BufferSize {
        UNIFORM_BINDING_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterned(seed: f32) -> Mat4 {
        Mat4::from_cols_array(&std::array::from_fn(|i| seed + i as f32 * 0.125))
    }

    #[test]
    fn block_is_192_bytes_in_slot_order() {
        assert_eq!(std::mem::size_of::<UniformBlock>() as u64, UNIFORM_BLOCK_SIZE);
        assert_eq!(MatrixSlot::Model.offset(), 0);
        assert_eq!(MatrixSlot::View.offset(), 64);
        assert_eq!(MatrixSlot::Projection.offset(), 128);
        assert_eq!(UniformBuffer::binding_size().get(), UNIFORM_BLOCK_SIZE);
    }

    #[test]
    fn slot_writes_round_trip_exact_bits() {
        // Includes values that would not survive a lossy conversion.
        let mut model = patterned(1.0).to_cols_array();
        model[3] = f32::MIN_POSITIVE;
        model[7] = -0.0;
        model[11] = f32::from_bits(0x7fc0_1234);
        let view = patterned(-3.3).to_cols_array();
        let projection = patterned(1e-7).to_cols_array();

        let mut block = UniformBlock::zeroed();
        block.write(0, bytemuck::cast_slice(&model)).unwrap();
        block.write(64, bytemuck::cast_slice(&view)).unwrap();
        block.write(128, bytemuck::cast_slice(&projection)).unwrap();

        let bits = |m: &[f32; 16]| m.map(f32::to_bits);
        assert_eq!(bits(&block.model), bits(&model));
        assert_eq!(bits(&block.view), bits(&view));
        assert_eq!(bits(&block.projection), bits(&projection));

        assert_eq!(block.slot_bytes(MatrixSlot::Model), bytemuck::cast_slice::<f32, u8>(&model));
    }

    #[test]
    fn from_matrices_is_column_major() {
        let m = Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0));
        let block = UniformBlock::from_matrices(m, Mat4::IDENTITY, Mat4::IDENTITY);
        assert_eq!(&block.model[12..15], &[1.0, 2.0, 3.0]);
        assert_eq!(block.matrix(MatrixSlot::Model), m);
    }

    #[test]
    fn misaligned_offset_is_rejected() {
        let mut block = UniformBlock::zeroed();
        let bytes = [0xABu8; 64];

        for offset in [1, 32, 63, 96, 192, 256] {
            let err = block.write(offset, &bytes).unwrap_err();
            assert!(matches!(
                err,
                RenderError::BufferContractViolation { offset: o, len: 64 } if o == offset
            ));
        }
        assert_eq!(block, UniformBlock::zeroed());
    }

    #[test]
    fn wrong_length_is_rejected() {
        let mut block = UniformBlock::zeroed();

        for len in [0usize, 16, 63, 65, 128] {
            let bytes = vec![1u8; len];
            assert!(matches!(
                block.write(64, &bytes),
                Err(RenderError::BufferContractViolation { offset: 64, len: l }) if l == len
            ));
        }
        assert_eq!(block, UniformBlock::zeroed());
    }

    #[test]
    fn device_buffer_mirrors_accepted_writes() {
        let Some((device, queue)) = crate::device::test_device() else {
            eprintln!("no GPU adapter; skipping");
            return;
        };

        let mut ubo = UniformBuffer::new(&device);
        assert_eq!(ubo.buffer().size(), UNIFORM_BLOCK_SIZE);

        let block = UniformBlock::from_matrices(patterned(0.5), patterned(2.0), patterned(9.0));
        ubo.write_block(&queue, &block).unwrap();
        assert_eq!(ubo.contents(), &block);

        assert!(ubo.write(&queue, 8, &[0u8; 64]).is_err());
        assert_eq!(ubo.contents(), &block);
    }
}

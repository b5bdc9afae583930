use crate::error::MmuError;

/// A contiguous, disjoint region of the 16-bit address space.
///
/// Unmapped addresses are handled by the [`Mmu`] itself (reads yield 0,
/// writes are dropped); a `Block` only ever describes mapped memory.
struct Block {
    start: u16,
    length: u16,
    readonly: bool,
    data: Vec<u8>,
}

impl Block {
    fn end(&self) -> u32 {
        self.start as u32 + self.length as u32
    }

    fn overlaps(&self, start: u16, length: u16) -> bool {
        let other_end = start as u32 + length as u32;
        (start as u32) < self.end() && (self.start as u32) < other_end
    }
}

/// Partitions the flat 16-bit bus into readable/writable blocks.
///
/// Blocks are resolved by linear scan: the 6502's address space is small
/// and a real machine rarely maps more than a handful of regions (RAM,
/// ROM, a couple of I/O windows), so there's no need for an interval tree.
pub struct Mmu {
    blocks: Vec<Block>,
}

impl Mmu {
    pub fn new() -> Mmu {
        Mmu { blocks: Vec::new() }
    }

    /// Registers a memory region. `image`, if given, is copied into the
    /// start of the block; the rest of the block reads as zero.
    ///
    /// Fails if the region overlaps one already registered, or if `image`
    /// is longer than `length`.
    pub fn add_block(
        &mut self,
        start: u16,
        length: u16,
        readonly: bool,
        image: Option<&[u8]>,
    ) -> Result<(), MmuError> {
        if let Some(image) = image {
            if image.len() > length as usize {
                return Err(MmuError::ImageTooLarge {
                    image_len: image.len(),
                    block_len: length as usize,
                });
            }
        }

        if let Some(existing) = self.blocks.iter().find(|b| b.overlaps(start, length)) {
            return Err(MmuError::OverlappingBlock {
                new_start: start,
                new_end: start.wrapping_add(length),
                existing_start: existing.start,
                existing_end: existing.start.wrapping_add(existing.length),
            });
        }

        let mut data = vec![0u8; length as usize];
        if let Some(image) = image {
            data[..image.len()].copy_from_slice(image);
        }

        log::debug!(
            "mmu: mapped block at {:#06x}, length {:#06x}, readonly={}",
            start,
            length,
            readonly
        );

        self.blocks.push(Block {
            start,
            length,
            readonly,
            data,
        });

        Ok(())
    }

    fn resolve(&self, addr: u16) -> Option<(&Block, usize)> {
        self.blocks
            .iter()
            .find(|b| (addr as u32) >= b.start as u32 && (addr as u32) < b.end())
            .map(|b| (b, (addr - b.start) as usize))
    }

    fn resolve_mut(&mut self, addr: u16) -> Option<(&mut Block, usize)> {
        self.blocks
            .iter_mut()
            .find(|b| (addr as u32) >= b.start as u32 && (addr as u32) < b.end())
            .map(|b| {
                let offset = (addr - b.start) as usize;
                (b, offset)
            })
    }

    /// Reads a byte. Unmapped addresses read as 0.
    pub fn read(&self, addr: u16) -> u8 {
        match self.resolve(addr) {
            Some((block, offset)) => block.data[offset],
            None => {
                log::trace!("mmu: read from unmapped address {:#06x}", addr);
                0
            }
        }
    }

    /// Reads a little-endian word, wrapping the high byte's address
    /// modulo 0x10000.
    pub fn read_word(&self, addr: u16) -> u16 {
        let low = self.read(addr);
        let high = self.read(addr.wrapping_add(1));
        u16::from_le_bytes([low, high])
    }

    /// Writes a byte. Silently dropped for read-only blocks and for
    /// unmapped addresses — a program legally attempting either of these
    /// is not an error the core should abort over.
    pub fn write(&mut self, addr: u16, value: u8) {
        match self.resolve_mut(addr) {
            Some((block, _)) if block.readonly => {
                log::trace!("mmu: dropped write to read-only address {:#06x}", addr);
            }
            Some((block, offset)) => block.data[offset] = value,
            None => {
                log::trace!("mmu: dropped write to unmapped address {:#06x}", addr);
            }
        }
    }

    /// Writes a little-endian word: the low byte first, then the high byte.
    pub fn write_word(&mut self, addr: u16, value: u16) {
        let [low, high] = value.to_le_bytes();
        self.write(addr, low);
        self.write(addr.wrapping_add(1), high);
    }
}

impl Default for Mmu {
    fn default() -> Mmu {
        Mmu::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unmapped_read_is_zero() {
        let mmu = Mmu::new();
        assert_eq!(mmu.read(0x1234), 0);
    }

    #[test]
    fn unmapped_write_is_dropped() {
        let mut mmu = Mmu::new();
        mmu.write(0x1234, 0xff);
        assert_eq!(mmu.read(0x1234), 0);
    }

    #[test]
    fn write_then_read_round_trips_on_a_writable_block() {
        let mut mmu = Mmu::new();
        mmu.add_block(0x0000, 0x0800, false, None).unwrap();
        mmu.write(0x0033, 0x42);
        assert_eq!(mmu.read(0x0033), 0x42);
    }

    #[test]
    fn write_to_readonly_block_is_dropped() {
        let mut mmu = Mmu::new();
        mmu.add_block(0x1000, 0x0100, true, Some(&[0xaa])).unwrap();
        mmu.write(0x1000, 0xff);
        assert_eq!(mmu.read(0x1000), 0xaa);
    }

    #[test]
    fn overlapping_block_is_rejected() {
        let mut mmu = Mmu::new();
        mmu.add_block(0x1000, 0x0100, false, None).unwrap();
        let err = mmu.add_block(0x10ff, 0x0010, false, None).unwrap_err();
        assert!(matches!(err, MmuError::OverlappingBlock { .. }));
    }

    #[test]
    fn adjacent_blocks_do_not_overlap() {
        let mut mmu = Mmu::new();
        mmu.add_block(0x1000, 0x0100, false, None).unwrap();
        mmu.add_block(0x1100, 0x0100, false, None).unwrap();
    }

    #[test]
    fn image_larger_than_block_is_rejected() {
        let mut mmu = Mmu::new();
        let err = mmu.add_block(0x1000, 0x0002, true, Some(&[1, 2, 3])).unwrap_err();
        assert!(matches!(err, MmuError::ImageTooLarge { .. }));
    }

    #[test]
    fn read_word_is_little_endian_and_wraps() {
        let mut mmu = Mmu::new();
        mmu.add_block(0xfffe, 2, true, Some(&[0x34, 0x12])).unwrap();
        assert_eq!(mmu.read_word(0xfffe), 0x1234);
    }

    #[test]
    fn write_word_writes_low_byte_first() {
        let mut mmu = Mmu::new();
        mmu.add_block(0x0000, 0x0800, false, None).unwrap();
        mmu.write_word(0x0010, 0x0510);
        assert_eq!(mmu.read(0x0010), 0x10);
        assert_eq!(mmu.read(0x0011), 0x05);
    }
}

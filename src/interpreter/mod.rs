pub mod ir_interpreter;
pub mod token_interpreter;

use std::io::{self, Read, Write};

use thiserror::Error;

use crate::{
    config::{EofPolicy, RuntimeConfig},
    ir::TransferEntry,
};

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Data pointer ({pointer}) out of bounds (tape length {tape_len})")]
    PointerOutOfBounds { pointer: isize, tape_len: usize },

    #[error("IO Error: {0}")]
    Io(#[from] io::Error),
}

/// Reduces a signed amount to the byte it adds under wraparound
fn wrap_delta(delta: i32) -> u8 {
    delta.rem_euclid(256) as u8
}

pub struct Runtime<R: Read, W: Write> {
    /// Pointer into the heap, always within bounds
    data_pointer: usize,

    /// Our statically allocated heap
    heap: Vec<u8>,

    eof: EofPolicy,

    in_stream: R,
    out_stream: W,
}

impl<R: Read, W: Write> Runtime<R, W> {
    pub fn new(config: RuntimeConfig, in_stream: R, out_stream: W) -> Self {
        Self {
            data_pointer: 0,
            // the pointer starts on cell 0, so there has to be one
            heap: vec![0; config.tape_size.max(1)],
            eof: config.eof,
            in_stream,
            out_stream,
        }
    }

    pub fn data_pointer(&self) -> usize {
        self.data_pointer
    }

    pub fn tape(&self) -> &[u8] {
        &self.heap
    }

    pub fn into_output(self) -> W {
        self.out_stream
    }

    /// Read one byte from the input stream into the cell at the data pointer
    pub fn read(&mut self) -> Result<(), RuntimeError> {
        // anything printed so far is probably a prompt for this read
        self.out_stream.flush()?;

        let mut byte = [0u8; 1];
        let read = loop {
            match self.in_stream.read(&mut byte) {
                Ok(read) => break read,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        };

        if read == 0 {
            match self.eof {
                EofPolicy::Zero => self.heap[self.data_pointer] = 0,
                EofPolicy::Unchanged => {}
                EofPolicy::Max => self.heap[self.data_pointer] = u8::MAX,
            }
        } else {
            self.heap[self.data_pointer] = byte[0];
        }
        Ok(())
    }

    /// Write the cell at the data pointer to the output stream
    pub fn write(&mut self) -> Result<(), RuntimeError> {
        self.out_stream
            .write_all(&self.heap[self.data_pointer..self.data_pointer + 1])?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), RuntimeError> {
        self.out_stream.flush()?;
        Ok(())
    }

    pub fn add_value(&mut self, by: i32) {
        self.heap[self.data_pointer] = self.heap[self.data_pointer].wrapping_add(wrap_delta(by));
    }

    pub fn set_value(&mut self, value: u8) {
        self.heap[self.data_pointer] = value;
    }

    pub fn shift_data_pointer(&mut self, by: isize) -> Result<(), RuntimeError> {
        self.data_pointer = self.offset_address(by)?;
        Ok(())
    }

    /// Adds `multiplier * cell` to every target, then clears the cell.
    ///
    /// A zero cell is left alone without touching the targets, just like the
    /// loop this replaces which would never enter its body.
    pub fn transfer(&mut self, entries: &[TransferEntry]) -> Result<(), RuntimeError> {
        let source = self.heap[self.data_pointer];
        if source == 0 {
            return Ok(());
        }

        for entry in entries {
            let target = self.offset_address(entry.offset)?;
            let amount = wrap_delta(entry.multiplier).wrapping_mul(source);
            self.heap[target] = self.heap[target].wrapping_add(amount);
        }

        self.heap[self.data_pointer] = 0;
        Ok(())
    }

    /// is the value at the data pointer zero?
    pub fn value_is_zero(&self) -> bool {
        self.heap[self.data_pointer] == 0
    }

    /// The address `offset` cells away from the data pointer, if it is on the tape
    fn offset_address(&self, offset: isize) -> Result<usize, RuntimeError> {
        self.data_pointer
            .checked_add_signed(offset)
            .filter(|&address| address < self.heap.len())
            .ok_or_else(|| RuntimeError::PointerOutOfBounds {
                pointer: (self.data_pointer as isize).saturating_add(offset),
                tape_len: self.heap.len(),
            })
    }
}

//! Flattened batch output.
//!
//! A batch of N inputs produces one flat `i32` id array and an `i64` array of
//! N+1 row offsets (CSR layout): the ids of input `i` are
//! `ids[row_offsets[i]..row_offsets[i + 1]]`. Consumers that allocate fixed
//! buffers first read `ids_len()` and `rows_len()`, then fill them with
//! [`TokenizedBatch::copy_into`].

use serde::Serialize;
use std::io::Write;
use wordpiece_core::{Result, TokenizerError, UNRECOGNIZED_ID};

/// Ids and row offsets for a tokenized batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenizedBatch {
    /// Flat ids of every input, in input order
    ids: Vec<i32>,
    /// Row boundaries; always starts with 0 and ends with `ids.len()`
    row_offsets: Vec<i64>,
}

impl TokenizedBatch {
    /// Start an empty batch with room for `rows` inputs.
    pub(crate) fn with_capacity(rows: usize) -> Self {
        let mut row_offsets = Vec::with_capacity(rows + 1);
        row_offsets.push(0);
        Self {
            ids: Vec::new(),
            row_offsets,
        }
    }

    /// Ids buffer that the current row appends to.
    pub(crate) fn ids_mut(&mut self) -> &mut Vec<i32> {
        &mut self.ids
    }

    /// Close the current row at the current id count.
    pub(crate) fn end_row(&mut self) {
        self.row_offsets.push(self.ids.len() as i64);
    }

    /// Append a row tokenized elsewhere.
    pub(crate) fn push_row(&mut self, ids: &[i32]) {
        self.ids.extend_from_slice(ids);
        self.end_row();
    }

    /// Flat token ids; `-1` marks an unrecognized word.
    pub fn ids(&self) -> &[i32] {
        &self.ids
    }

    /// CSR row offsets, `num_rows() + 1` entries.
    pub fn row_offsets(&self) -> &[i64] {
        &self.row_offsets
    }

    /// Length of the id buffer.
    pub fn ids_len(&self) -> usize {
        self.ids.len()
    }

    /// Length of the row offset buffer.
    pub fn rows_len(&self) -> usize {
        self.row_offsets.len()
    }

    /// Number of inputs in the batch.
    pub fn num_rows(&self) -> usize {
        self.row_offsets.len() - 1
    }

    /// Check if the batch produced no ids at all.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids produced by input `index`.
    pub fn row(&self, index: usize) -> Option<&[i32]> {
        let start = *self.row_offsets.get(index)? as usize;
        let end = *self.row_offsets.get(index + 1)? as usize;
        Some(&self.ids[start..end])
    }

    /// Iterate over the ids of each input.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[i32]> + '_ {
        self.row_offsets
            .windows(2)
            .map(move |w| &self.ids[w[0] as usize..w[1] as usize])
    }

    /// Number of sentinel ids in the batch.
    pub fn unrecognized_count(&self) -> usize {
        self.ids.iter().filter(|&&id| id == UNRECOGNIZED_ID).count()
    }

    /// Copy of the ids with every sentinel replaced by `unk_id`.
    pub fn replace_unrecognized(&self, unk_id: i32) -> Vec<i32> {
        self.ids
            .iter()
            .map(|&id| if id == UNRECOGNIZED_ID { unk_id } else { id })
            .collect()
    }

    /// Fill caller-allocated buffers of exactly `ids_len()` and `rows_len()`.
    pub fn copy_into(&self, ids: &mut [i32], row_offsets: &mut [i64]) -> Result<()> {
        if ids.len() != self.ids.len() {
            return Err(TokenizerError::BufferSize {
                buffer: "ids",
                expected: self.ids.len(),
                actual: ids.len(),
            });
        }
        if row_offsets.len() != self.row_offsets.len() {
            return Err(TokenizerError::BufferSize {
                buffer: "row_offsets",
                expected: self.row_offsets.len(),
                actual: row_offsets.len(),
            });
        }

        ids.copy_from_slice(&self.ids);
        row_offsets.copy_from_slice(&self.row_offsets);
        Ok(())
    }

    /// Ids as contiguous native-endian bytes (4 per id).
    pub fn ids_ne_bytes(&self) -> Vec<u8> {
        self.ids.iter().flat_map(|id| id.to_ne_bytes()).collect()
    }

    /// Row offsets as contiguous native-endian bytes (8 per offset).
    pub fn row_offsets_ne_bytes(&self) -> Vec<u8> {
        self.row_offsets
            .iter()
            .flat_map(|offset| offset.to_ne_bytes())
            .collect()
    }

    /// Write both buffers in native byte order.
    pub fn write_ne<I: Write, O: Write>(
        &self,
        mut ids_out: I,
        mut offsets_out: O,
    ) -> std::io::Result<()> {
        ids_out.write_all(&self.ids_ne_bytes())?;
        offsets_out.write_all(&self.row_offsets_ne_bytes())?;
        ids_out.flush()?;
        offsets_out.flush()
    }

    /// Take ownership of the two buffers.
    pub fn into_parts(self) -> (Vec<i32>, Vec<i64>) {
        (self.ids, self.row_offsets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TokenizedBatch {
        let mut batch = TokenizedBatch::with_capacity(3);
        batch.push_row(&[5, 6]);
        batch.push_row(&[]);
        batch.push_row(&[7, -1]);
        batch
    }

    #[test]
    fn test_empty_batch() {
        let batch = TokenizedBatch::with_capacity(0);
        assert_eq!(batch.row_offsets(), &[0]);
        assert_eq!(batch.num_rows(), 0);
        assert!(batch.is_empty());
        assert_eq!(batch.rows().count(), 0);
    }

    #[test]
    fn test_rows() {
        let batch = sample();

        assert_eq!(batch.row_offsets(), &[0, 2, 2, 4]);
        assert_eq!(batch.num_rows(), 3);
        assert_eq!(batch.row(0), Some(&[5, 6][..]));
        assert_eq!(batch.row(1), Some(&[][..]));
        assert_eq!(batch.row(2), Some(&[7, -1][..]));
        assert_eq!(batch.row(3), None);

        let rows: Vec<&[i32]> = batch.rows().collect();
        assert_eq!(rows, vec![&[5, 6][..], &[][..], &[7, -1][..]]);
    }

    #[test]
    fn test_unrecognized() {
        let batch = sample();
        assert_eq!(batch.unrecognized_count(), 1);
        assert_eq!(batch.replace_unrecognized(100), vec![5, 6, 7, 100]);
        // The batch itself is untouched.
        assert_eq!(batch.ids(), &[5, 6, 7, -1]);
    }

    #[test]
    fn test_copy_into() {
        let batch = sample();
        let mut ids = vec![0i32; batch.ids_len()];
        let mut offsets = vec![0i64; batch.rows_len()];

        batch.copy_into(&mut ids, &mut offsets).unwrap();

        assert_eq!(ids, vec![5, 6, 7, -1]);
        assert_eq!(offsets, vec![0, 2, 2, 4]);
    }

    #[test]
    fn test_copy_into_size_mismatch() {
        let batch = sample();
        let mut ids = vec![0i32; 3];
        let mut offsets = vec![0i64; 4];

        match batch.copy_into(&mut ids, &mut offsets) {
            Err(TokenizerError::BufferSize {
                buffer,
                expected,
                actual,
            }) => {
                assert_eq!(buffer, "ids");
                assert_eq!(expected, 4);
                assert_eq!(actual, 3);
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let mut ids = vec![0i32; 4];
        let mut offsets = vec![0i64; 5];
        assert!(matches!(
            batch.copy_into(&mut ids, &mut offsets),
            Err(TokenizerError::BufferSize {
                buffer: "row_offsets",
                ..
            })
        ));
    }

    #[test]
    fn test_native_endian_bytes() {
        let batch = sample();

        let id_bytes = batch.ids_ne_bytes();
        assert_eq!(id_bytes.len(), 4 * 4);
        assert_eq!(&id_bytes[12..16], &(-1i32).to_ne_bytes());

        let offset_bytes = batch.row_offsets_ne_bytes();
        assert_eq!(offset_bytes.len(), 4 * 8);
        assert_eq!(&offset_bytes[8..16], &2i64.to_ne_bytes());
    }

    #[test]
    fn test_write_ne() {
        let batch = sample();
        let mut ids_out = Vec::new();
        let mut offsets_out = Vec::new();

        batch.write_ne(&mut ids_out, &mut offsets_out).unwrap();

        assert_eq!(ids_out, batch.ids_ne_bytes());
        assert_eq!(offsets_out, batch.row_offsets_ne_bytes());
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(json, r#"{"ids":[5,6,7,-1],"row_offsets":[0,2,2,4]}"#);
    }
}

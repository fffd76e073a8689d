use crate::types::Bar;

/// A piece that cannot be cut from an empty bar of the given stock length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oversize {
    pub length: f64,
}

/// Open bars for one stock length, in creation order.
///
/// Every placed piece consumes its own length plus one cutting gap. A piece
/// fits a bar only when that whole charge is still available, so `remaining`
/// never drops below zero.
#[derive(Debug, Clone)]
pub struct BarPacker {
    stock_length: f64,
    cutting_gap: f64,
    remaining: Vec<f64>,
    pieces: Vec<Vec<f64>>,
}

impl BarPacker {
    pub fn new(stock_length: f64, cutting_gap: f64) -> Self {
        Self {
            stock_length,
            cutting_gap,
            remaining: Vec::new(),
            pieces: Vec::new(),
        }
    }

    /// Index of the earliest-created bar with room for `length`.
    pub fn find_first(&self, length: f64) -> Option<usize> {
        let needed = length + self.cutting_gap;
        self.remaining.iter().position(|&r| needed <= r)
    }

    /// Places `length` into the first bar that fits, opening a new bar when
    /// none does. Returns the index of the receiving bar.
    pub fn place(&mut self, length: f64) -> Result<usize, Oversize> {
        let charge = length + self.cutting_gap;
        if let Some(bi) = self.find_first(length) {
            self.remaining[bi] -= charge;
            self.pieces[bi].push(length);
            return Ok(bi);
        }

        if charge > self.stock_length {
            return Err(Oversize { length });
        }
        self.remaining.push(self.stock_length - charge);
        self.pieces.push(vec![length]);
        Ok(self.remaining.len() - 1)
    }

    pub fn into_bars(self) -> Vec<Bar> {
        self.pieces
            .into_iter()
            .zip(self.remaining)
            .map(|(pieces, remaining)| Bar { pieces, remaining })
            .collect()
    }
}

/// First-fit packing of `lengths` in the order given.
///
/// Callers sort descending first; the result is fully determined by the
/// input order.
pub fn generate_patterns(
    lengths: &[f64],
    stock_length: f64,
    cutting_gap: f64,
) -> Result<Vec<Bar>, Oversize> {
    let mut packer = BarPacker::new(stock_length, cutting_gap);
    for &length in lengths {
        packer.place(length)?;
    }
    Ok(packer.into_bars())
}

/// Sorts lengths largest first. Equal lengths keep their relative order.
pub fn sort_descending(lengths: &mut [f64]) {
    lengths.sort_by(|a, b| b.total_cmp(a));
}

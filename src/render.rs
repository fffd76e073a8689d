use crate::types::Pattern;

const MAX_WIDTH: f64 = 80.0;
const ROWS: usize = 3;

/// Draws a bar as a three-line strip: one box per piece, the cutting gap as
/// the space between boxes, and the offcut filled with `.`.
pub fn render_bar(pattern: &Pattern, cutting_gap: f64) -> String {
    if pattern.stock_length <= 0.0 {
        return String::new();
    }
    let scale = MAX_WIDTH / pattern.stock_length;
    let grid_w = (pattern.stock_length * scale).round() as usize;

    let mut grid = vec![vec![' '; grid_w + 1]; ROWS];

    let mut pos = 0.0;
    for &piece in &pattern.pieces {
        let sx = (pos * scale).round() as usize;
        let sw = (piece * scale).round() as usize;
        pos += piece + cutting_gap;
        if sw == 0 {
            continue;
        }
        draw_segment(&mut grid, sx, sw);

        let label: Vec<char> = piece.to_string().chars().collect();
        if label.len() + 2 <= sw {
            let start = sx + (sw - label.len()) / 2 + 1;
            for (i, &ch) in label.iter().enumerate() {
                let x = start + i;
                if x > sx && x < sx + sw {
                    grid[1][x] = ch;
                }
            }
        }
    }

    if pattern.remaining_length > 0.0 {
        let start = (pattern.used_length * scale).round() as usize;
        for cell in grid[1].iter_mut().take(grid_w).skip(start + 1) {
            *cell = '.';
        }
    }
    // Stock end marker
    if grid[1][grid_w] == ' ' {
        grid[1][grid_w] = '|';
    }

    let mut result = String::new();
    for row in &grid {
        let line: String = row.iter().collect();
        result.push_str(line.trim_end());
        result.push('\n');
    }
    result
}

fn draw_segment(grid: &mut [Vec<char>], x: usize, w: usize) {
    let cols = grid[0].len();
    let end = (x + w).min(cols - 1);

    for i in x..=end {
        for row in [0, ROWS - 1] {
            if grid[row][i] != '+' {
                grid[row][i] = '-';
            }
        }
    }
    for cx in [x, end] {
        grid[0][cx] = '+';
        grid[ROWS - 1][cx] = '+';
        grid[1][cx] = '|';
    }
}

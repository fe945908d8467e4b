//! Partitioning of commands into request-sized batches

use umsync_domain::{ActionCommand, Batch};

/// Split `commands` into consecutive batches of at most `size` commands.
///
/// Order is preserved; only the last batch may be short. A `size` of zero
/// is treated as one.
pub fn partition(commands: Vec<ActionCommand>, size: usize) -> Vec<Batch> {
    let size = size.max(1);
    let mut batches = Vec::with_capacity(commands.len().div_ceil(size));
    let mut current = Vec::with_capacity(size);

    for command in commands {
        current.push(command);
        if current.len() == size {
            batches.push(Batch::new(std::mem::replace(&mut current, Vec::with_capacity(size))));
        }
    }
    if !current.is_empty() {
        batches.push(Batch::new(current));
    }

    batches
}

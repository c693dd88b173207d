/// Cursor over the related records offered in an association field.
#[derive(Debug, Clone, Default)]
pub struct PickerState {
    pub cursor: usize,
}

impl PickerState {
    pub fn next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.cursor = if self.cursor + 1 >= len { 0 } else { self.cursor + 1 };
    }

    pub fn previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.cursor = if self.cursor == 0 { len - 1 } else { self.cursor - 1 };
    }
}

/// New selection after toggling `id`: removed if present, appended otherwise.
pub fn toggled(selection: &[i64], id: i64) -> Vec<i64> {
    if selection.contains(&id) {
        selection.iter().copied().filter(|&s| s != id).collect()
    } else {
        let mut next = selection.to_vec();
        next.push(id);
        next
    }
}

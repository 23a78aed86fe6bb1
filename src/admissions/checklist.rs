//! Document checklist applicants tick off while gathering paperwork

/// Documents every applicant brings to the admission interaction
pub const ADMISSION_DOCUMENTS: &[&str] = &[
    "Birth certificate",
    "Four passport size photographs",
    "Aadhaar card of student",
    "Aadhaar card of parents",
    "Address proof",
    "Transfer certificate (Class II onwards)",
    "Previous class report card",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistItem {
    pub label: &'static str,
    pub checked: bool,
}

#[derive(Debug, Clone)]
pub struct DocumentChecklist {
    items: Vec<ChecklistItem>,
    pub selected: usize,
}

impl DocumentChecklist {
    pub fn new() -> Self {
        Self {
            items: ADMISSION_DOCUMENTS
                .iter()
                .map(|&label| ChecklistItem {
                    label,
                    checked: false,
                })
                .collect(),
            selected: 0,
        }
    }

    pub fn items(&self) -> &[ChecklistItem] {
        &self.items
    }

    pub fn toggle(&mut self, index: usize) {
        if let Some(item) = self.items.get_mut(index) {
            item.checked = !item.checked;
        }
    }

    pub fn toggle_selected(&mut self) {
        self.toggle(self.selected);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn checked_count(&self) -> usize {
        self.items.iter().filter(|i| i.checked).count()
    }
}

impl Default for DocumentChecklist {
    fn default() -> Self {
        Self::new()
    }
}

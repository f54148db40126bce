/// Which of the suggestible fields the user has set by hand
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchTracker {
    pub category: bool,
    pub priority: bool,
}

/// A field a classification suggestion can fill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestibleField {
    Category,
    Priority,
}

impl TouchTracker {
    pub fn touch(&mut self, field: SuggestibleField) {
        match field {
            SuggestibleField::Category => self.category = true,
            SuggestibleField::Priority => self.priority = true,
        }
    }

    pub fn is_touched(&self, field: SuggestibleField) -> bool {
        match field {
            SuggestibleField::Category => self.category,
            SuggestibleField::Priority => self.priority,
        }
    }

    pub fn touch_all(&mut self) {
        self.category = true;
        self.priority = true;
    }

    pub fn reset(&mut self) {
        *self = TouchTracker::default();
    }
}

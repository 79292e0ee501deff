#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorMode {
    ReadOnly,
    Editing,
}

impl EditorMode {
    pub fn from_read_only(read_only: bool) -> Self {
        if read_only {
            Self::ReadOnly
        } else {
            Self::Editing
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::ReadOnly => Self::Editing,
            Self::Editing => Self::ReadOnly,
        }
    }

    pub fn is_read_only(self) -> bool {
        self == Self::ReadOnly
    }

    pub fn input_class(self) -> &'static str {
        match self {
            Self::ReadOnly => "form-control-plaintext",
            Self::Editing => "form-control",
        }
    }

    pub fn toggle_button_html(self) -> &'static str {
        match self {
            Self::ReadOnly => "<i class=\"fas fa-edit\"></i> Edit",
            Self::Editing => "<i class=\"fas fa-times-circle\"></i> Dismiss",
        }
    }

    pub fn submit_hidden(self) -> bool {
        self.is_read_only()
    }
}

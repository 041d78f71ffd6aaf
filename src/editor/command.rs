/// Placeholder in a template that is filled from the staged link URL.
const URL_PLACEHOLDER: &str = "{url}";

/// Toolbar insertion commands.
///
/// Each command is described by data: a fragment template, and whether it
/// needs a staged [`LinkDraft`] before it can produce a fragment. One
/// generic operation interprets them; nothing downstream branches on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsertCommand {
    Heading1,
    Heading2,
    Bold,
    Italic,
    BulletList,
    Image,
    Link,
    Strikethrough,
    Blockquote,
    CodeBlock,
    NumberedList,
    HorizontalRule,
}

impl InsertCommand {
    /// Commands in toolbar order.
    pub const ALL: [Self; 12] = [
        Self::Heading1,
        Self::Heading2,
        Self::Bold,
        Self::Italic,
        Self::BulletList,
        Self::Image,
        Self::Link,
        Self::Strikethrough,
        Self::Blockquote,
        Self::CodeBlock,
        Self::NumberedList,
        Self::HorizontalRule,
    ];

    /// The fragment template inserted by this command.
    pub const fn template(self) -> &'static str {
        match self {
            Self::Heading1 => "# H1",
            Self::Heading2 => "## H2",
            Self::Bold => "**Bold** ",
            Self::Italic => "*Italic* ",
            Self::BulletList => "- List\n",
            Self::Image => "![Image](url) ",
            Self::Link => "[Link]({url}) ",
            Self::Strikethrough => "~~Strikethrough~~ ",
            Self::Blockquote => "> Blockquote\n",
            Self::CodeBlock => "```\nCodeblock\n``` ",
            Self::NumberedList => "1. Numbered List\n",
            Self::HorizontalRule => "---\n",
        }
    }

    /// Whether the command opens the link dialog instead of inserting directly.
    pub const fn requires_draft(self) -> bool {
        matches!(self, Self::Link)
    }

    /// Short toolbar label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Heading1 => "H1",
            Self::Heading2 => "H2",
            Self::Bold => "Bold",
            Self::Italic => "Italic",
            Self::BulletList => "List",
            Self::Image => "Image",
            Self::Link => "Link",
            Self::Strikethrough => "Strike",
            Self::Blockquote => "Quote",
            Self::CodeBlock => "Code",
            Self::NumberedList => "1. List",
            Self::HorizontalRule => "Rule",
        }
    }

    /// Key pressed together with Alt to run the command.
    pub const fn hotkey(self) -> char {
        match self {
            Self::Heading1 => '1',
            Self::Heading2 => '2',
            Self::Bold => 'b',
            Self::Italic => 'i',
            Self::BulletList => 'l',
            Self::Image => 'g',
            Self::Link => 'k',
            Self::Strikethrough => 's',
            Self::Blockquote => 'q',
            Self::CodeBlock => 'c',
            Self::NumberedList => 'n',
            Self::HorizontalRule => 'h',
        }
    }

    pub fn from_hotkey(key: char) -> Option<Self> {
        let key = key.to_ascii_lowercase();
        Self::ALL.into_iter().find(|cmd| cmd.hotkey() == key)
    }

    /// Build the fragment to insert.
    ///
    /// Commands that need a draft return `None` unless the draft holds a
    /// non-blank URL. The URL is substituted verbatim.
    pub fn fragment(self, draft: Option<&LinkDraft>) -> Option<String> {
        let template = self.template();
        if !self.requires_draft() {
            return Some(template.to_string());
        }
        let draft = draft.filter(|d| !d.is_blank())?;
        Some(template.replace(URL_PLACEHOLDER, draft.url()))
    }
}

/// The URL being typed into the link dialog.
///
/// Lives only while the dialog is open and is never merged into the buffer
/// on cancel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkDraft {
    url: String,
}

impl LinkDraft {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    /// Empty or whitespace-only URLs are a no-op on confirm.
    pub fn is_blank(&self) -> bool {
        self.url.trim().is_empty()
    }
}

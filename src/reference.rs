//! References to sub-resources found in a page.

use ego_tree::NodeId;

/// The kinds of elements whose targets are downloaded, in processing order.
pub const TAG_KINDS: [TagKind; 3] = [TagKind::Image, TagKind::Link, TagKind::Script];

/// Element kind carrying a downloadable reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// `<img src>`, fetched from any origin.
    Image,
    /// `<link href>`, fetched only when local.
    Link,
    /// `<script src>`, fetched only when local.
    Script,
}

impl TagKind {
    /// HTML tag name.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Image => "img",
            Self::Link => "link",
            Self::Script => "script",
        }
    }

    /// Attribute holding the reference.
    pub const fn attribute(self) -> &'static str {
        match self {
            Self::Image => "src",
            Self::Link => "href",
            Self::Script => "src",
        }
    }

    /// Whether the reference is fetched regardless of its origin.
    pub const fn always_download(self) -> bool {
        matches!(self, Self::Image)
    }
}

/// An element attribute pointing at a resource that may be downloaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadableReference {
    /// Element the attribute belongs to.
    pub node: NodeId,
    pub kind: TagKind,
    /// Attribute value exactly as written in the page.
    pub raw_value: String,
}

impl DownloadableReference {
    pub fn attribute(&self) -> &'static str {
        self.kind.attribute()
    }
}

/// A reference whose source URL and local file name are both known.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedAsset {
    pub absolute_url: String,
    pub local_file_name: String,
}

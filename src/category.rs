mod membership;
mod sections;
mod title;
mod viewer;

pub use membership::{CategoryMembership, MemberEntry, MembershipQuery, PagingWindow};
pub use sections::{
    LetterGroup, ListItem, ListLayout, PagingLinks, Section, SectionRenderer, SectionView,
    TemplateSections,
};
pub use title::{Namespace, Title};
pub use viewer::SectionedViewer;

//! Extension point identities.

use std::fmt;
use std::str::FromStr;

use crate::category::Section;

/// Page-level points. Callbacks receive the page and the output sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PagePoint {
    /// Fired once per view; STOP ends the view.
    View,
    /// Fired before the article body; STOP suppresses the default pre-body markup.
    Open,
    /// Fired after the article body; STOP suppresses the composed category body.
    Close,
}

/// Every named interception slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionPoint {
    Page(PagePoint),
    ViewerInit,
    DoCategoryQuery,
    Section(Section),
}

impl ExtensionPoint {
    pub const ALL: [ExtensionPoint; 11] = [
        ExtensionPoint::Page(PagePoint::View),
        ExtensionPoint::Page(PagePoint::Open),
        ExtensionPoint::Page(PagePoint::Close),
        ExtensionPoint::ViewerInit,
        ExtensionPoint::DoCategoryQuery,
        ExtensionPoint::Section(Section::Top),
        ExtensionPoint::Section(Section::Subcategories),
        ExtensionPoint::Section(Section::Pages),
        ExtensionPoint::Section(Section::Media),
        ExtensionPoint::Section(Section::Other),
        ExtensionPoint::Section(Section::Bottom),
    ];

    /// The registration name of this point.
    pub fn name(self) -> &'static str {
        match self {
            ExtensionPoint::Page(PagePoint::View) => "FlexibleCategoryPageView",
            ExtensionPoint::Page(PagePoint::Open) => "FlexibleCategoryPage::openShowCategory",
            ExtensionPoint::Page(PagePoint::Close) => "FlexibleCategoryPage::closeShowCategory",
            ExtensionPoint::ViewerInit => "FlexibleCategoryViewer::init",
            ExtensionPoint::DoCategoryQuery => "FlexibleCategoryViewer::doCategoryQuery",
            ExtensionPoint::Section(Section::Top) => "FlexibleCategoryViewer::getCategoryTop",
            ExtensionPoint::Section(Section::Subcategories) => {
                "FlexibleCategoryViewer::getSubcategorySection"
            }
            ExtensionPoint::Section(Section::Pages) => "FlexibleCategoryViewer::getPagesSection",
            ExtensionPoint::Section(Section::Media) => "FlexibleCategoryViewer::getImageSection",
            ExtensionPoint::Section(Section::Other) => "FlexibleCategoryViewer::getOtherSection",
            ExtensionPoint::Section(Section::Bottom) => {
                "FlexibleCategoryViewer::getCategoryBottom"
            }
        }
    }
}

impl From<PagePoint> for ExtensionPoint {
    fn from(point: PagePoint) -> Self {
        ExtensionPoint::Page(point)
    }
}

impl From<Section> for ExtensionPoint {
    fn from(section: Section) -> Self {
        ExtensionPoint::Section(section)
    }
}

impl fmt::Display for ExtensionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("unknown extension point: {0}")]
pub struct UnknownPointError(pub String);

impl FromStr for ExtensionPoint {
    type Err = UnknownPointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|point| point.name() == s)
            .ok_or_else(|| UnknownPointError(s.to_string()))
    }
}

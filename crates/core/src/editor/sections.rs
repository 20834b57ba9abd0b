//! Collapsible sections of the product editor.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Basic,
    ProductInfo,
    QuickSpecs,
    Documents,
    Stats,
    MainFeatures,
    DetailedFeatures,
    Media,
    Accessories,
    RelatedProducts,
    CaseStudies,
    TechnicalSpecs,
    Faqs,
    Industries,
    Contact,
}

impl Section {
    pub const ALL: [Section; 15] = [
        Section::Basic,
        Section::ProductInfo,
        Section::QuickSpecs,
        Section::Documents,
        Section::Stats,
        Section::MainFeatures,
        Section::DetailedFeatures,
        Section::Media,
        Section::Accessories,
        Section::RelatedProducts,
        Section::CaseStudies,
        Section::TechnicalSpecs,
        Section::Faqs,
        Section::Industries,
        Section::Contact,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Basic => "basic",
            Section::ProductInfo => "productInfo",
            Section::QuickSpecs => "quickSpecs",
            Section::Documents => "documents",
            Section::Stats => "stats",
            Section::MainFeatures => "mainFeatures",
            Section::DetailedFeatures => "detailedFeatures",
            Section::Media => "media",
            Section::Accessories => "accessories",
            Section::RelatedProducts => "relatedProducts",
            Section::CaseStudies => "caseStudies",
            Section::TechnicalSpecs => "technicalSpecs",
            Section::Faqs => "faqs",
            Section::Industries => "industries",
            Section::Contact => "contact",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .iter()
            .find(|sec| sec.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("unknown section `{s}`"))
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Region/language code attached to every category and product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CountryLang {
    #[default]
    #[serde(rename = "default")]
    Default,
    #[serde(rename = "en-ae")]
    EnAe,
    #[serde(rename = "en-us")]
    EnUs,
    #[serde(rename = "en-my")]
    EnMy,
}

impl CountryLang {
    pub fn as_str(&self) -> &'static str {
        match self {
            CountryLang::Default => "default",
            CountryLang::EnAe => "en-ae",
            CountryLang::EnUs => "en-us",
            CountryLang::EnMy => "en-my",
        }
    }

    pub const ALL: [CountryLang; 4] = [
        CountryLang::Default,
        CountryLang::EnAe,
        CountryLang::EnUs,
        CountryLang::EnMy,
    ];
}

impl std::fmt::Display for CountryLang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CountryLang {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(CountryLang::Default),
            "en-ae" => Ok(CountryLang::EnAe),
            "en-us" => Ok(CountryLang::EnUs),
            "en-my" => Ok(CountryLang::EnMy),
            other => Err(format!("unknown country/language code `{other}`")),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Category document as persisted by the backend. `url` and `countryLang`
/// are fixed at creation; only `title` and the active flag change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub country_lang: CountryLang,
    pub title: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Creation payload for `POST /categories`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub url: String,
    pub country_lang: CountryLang,
    pub title: String,
}

/// Update payload for `PUT /categories/:id` — only the title is mutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryUpdate {
    pub title: String,
}

/// Product document, canonical nested shape. Unknown backend fields are
/// retained through `extra` so a full-document replace never drops them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub slug: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub country_lang: CountryLang,
    pub product: ProductInfo,
    #[serde(default)]
    pub features: Features,
    #[serde(default)]
    pub media: Media,
    #[serde(default)]
    pub accessories: Vec<Accessory>,
    #[serde(default)]
    pub related_products: Vec<RelatedProduct>,
    #[serde(default)]
    pub case_studies: Vec<CaseStudy>,
    #[serde(default)]
    pub technical_specifications: TechnicalSpecifications,
    #[serde(default)]
    pub faqs: Vec<Faq>,
    #[serde(default)]
    pub industries: Vec<Industry>,
    #[serde(default)]
    pub contact: Contact,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInfo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "type", default)]
    pub product_type: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub hero_image: String,
    #[serde(default)]
    pub quick_specs: Vec<QuickSpec>,
    #[serde(default)]
    pub documents: Vec<DocumentLink>,
    #[serde(default)]
    pub stats: Vec<Stat>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuickSpec {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentLink {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stat {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Features {
    #[serde(default)]
    pub main_features: Vec<MainFeature>,
    #[serde(default)]
    pub detailed_features: Vec<DetailedFeature>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MainFeature {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetailedFeature {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Media {
    #[serde(default)]
    pub video: VideoBlock,
    #[serde(default)]
    pub images: Vec<MediaImage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoBlock {
    #[serde(rename = "type", default)]
    pub media_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub video_url: String,
}

impl Default for VideoBlock {
    fn default() -> Self {
        Self {
            media_type: "video".to_string(),
            title: String::new(),
            thumbnail: String::new(),
            video_url: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaImage {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accessory {
    /// Synthetic numeric id minted when the row is added.
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub original_price: String,
    #[serde(default)]
    pub badge: String,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelatedProduct {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub range: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub link: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaseStudy {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub link: String,
}

/// Per-model spec tables are maps keyed model name → synthetic row key →
/// [`SpecRow`]. Kept as JSON maps (insertion-ordered) because rows are
/// addressed by generated keys, not struct fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalSpecifications {
    #[serde(default)]
    pub models: Vec<String>,
    #[serde(default)]
    pub general_technical_drawing: String,
    #[serde(default)]
    pub technical_data: Map<String, Value>,
    #[serde(default)]
    pub dimensional_data: Map<String, Value>,
}

/// One row in a technical or dimensional data table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpecRow {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub metric: String,
    #[serde(default)]
    pub imperial: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Faq {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Industry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub short_desc: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub stats: Vec<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default)]
    pub sales: SalesContact,
    #[serde(default)]
    pub support: SupportContact,
    #[serde(default)]
    pub office_hours: OfficeHours,
    #[serde(default)]
    pub industry_options: Vec<Value>,
}

impl Default for Contact {
    fn default() -> Self {
        Self {
            sales: SalesContact::default(),
            support: SupportContact::default(),
            office_hours: OfficeHours::default(),
            industry_options: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesContact {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

impl Default for SalesContact {
    fn default() -> Self {
        Self {
            title: "Sales Inquiries".to_string(),
            phone: String::new(),
            email: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportContact {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub availability: String,
    #[serde(default)]
    pub email: String,
}

impl Default for SupportContact {
    fn default() -> Self {
        Self {
            title: "Technical Support".to_string(),
            availability: String::new(),
            email: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfficeHours {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub weekdays: String,
    #[serde(default)]
    pub weekends: String,
    #[serde(default)]
    pub email: String,
}

impl Default for OfficeHours {
    fn default() -> Self {
        Self {
            title: "Office Hours".to_string(),
            weekdays: String::new(),
            weekends: String::new(),
            email: String::new(),
        }
    }
}

/// Stored-object descriptor returned by `POST /upload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedFileDescriptor {
    pub url: String,
    pub size: u64,
    pub mimetype: String,
    pub originalname: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_wire_names() {
        let json = serde_json::json!({
            "_id": "abc",
            "url": "faucets",
            "countryLang": "en-ae",
            "title": "Bathroom Faucets",
            "isActive": true,
            "createdAt": "2024-01-15T10:00:00Z"
        });
        let cat: CategoryDocument = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(cat.id, "abc");
        assert_eq!(cat.country_lang, CountryLang::EnAe);
        assert!(cat.is_active);

        let back = serde_json::to_value(&cat).unwrap();
        assert_eq!(back["_id"], "abc");
        assert_eq!(back["countryLang"], "en-ae");
    }

    #[test]
    fn product_round_trip_keeps_unknown_fields() {
        let json = serde_json::json!({
            "_id": "p1",
            "slug": "tsl-series",
            "isActive": true,
            "countryLang": "default",
            "product": { "id": "tsl", "name": "TSL Series" },
            "someBackendField": 42
        });
        let doc: ProductDocument = serde_json::from_value(json).unwrap();
        assert_eq!(doc.slug, "tsl-series");
        assert_eq!(doc.product.name, "TSL Series");

        let back = serde_json::to_value(&doc).unwrap();
        assert_eq!(back["someBackendField"], 42);
        assert_eq!(back["media"]["video"]["type"], "video");
    }

    #[test]
    fn country_lang_parses_all_codes() {
        for lang in CountryLang::ALL {
            assert_eq!(lang.as_str().parse::<CountryLang>().unwrap(), lang);
        }
        assert!("fr-fr".parse::<CountryLang>().is_err());
    }
}

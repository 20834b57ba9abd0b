//! Default-record factories for every array-of-records field the product
//! editor appends to, plus the complete default product document.
//!
//! The default document literal contains every container the mutation
//! engine may address, so paths never fail to resolve on a fresh session.

use serde_json::{json, Value};

/// Complete default product document, all containers present and empty.
pub fn new_product() -> Value {
    json!({
        "slug": "",
        "isActive": true,
        "countryLang": "default",
        "product": {
            "id": "",
            "name": "",
            "category": "",
            "type": "",
            "tagline": "",
            "description": "",
            "heroImage": "",
            "quickSpecs": [],
            "documents": [],
            "stats": []
        },
        "features": {
            "mainFeatures": [],
            "detailedFeatures": []
        },
        "media": {
            "video": { "type": "video", "title": "", "thumbnail": "", "videoUrl": "" },
            "images": []
        },
        "accessories": [],
        "relatedProducts": [],
        "caseStudies": [],
        "technicalSpecifications": {
            "models": [],
            "generalTechnicalDrawing": "",
            "technicalData": {},
            "dimensionalData": {}
        },
        "faqs": [],
        "industries": [],
        "contact": {
            "sales": { "title": "Sales Inquiries", "phone": "", "email": "" },
            "support": { "title": "Technical Support", "availability": "", "email": "" },
            "officeHours": { "title": "Office Hours", "weekdays": "", "weekends": "", "email": "" },
            "industryOptions": []
        }
    })
}

pub fn quick_spec() -> Value {
    json!({ "value": "", "unit": "", "label": "" })
}

pub fn document_link() -> Value {
    json!({ "title": "", "url": "" })
}

pub fn stat() -> Value {
    json!({ "title": "", "description": "" })
}

pub fn main_feature() -> Value {
    json!({ "title": "", "description": "", "image": "" })
}

pub fn detailed_feature() -> Value {
    json!({ "title": "", "description": "" })
}

pub fn media_image() -> Value {
    json!({ "title": "", "description": "", "image": "" })
}

/// Accessories carry a synthetic numeric id so rows keep identity while
/// being reordered or removed.
pub fn accessory(id: i64) -> Value {
    json!({
        "id": id,
        "name": "",
        "slug": "",
        "category": "",
        "description": "",
        "image": "",
        "price": "",
        "originalPrice": "",
        "badge": "",
        "features": []
    })
}

pub fn related_product() -> Value {
    json!({ "name": "", "tagline": "", "range": "", "image": "", "link": "" })
}

pub fn case_study() -> Value {
    json!({
        "title": "",
        "industry": "",
        "result": "",
        "description": "",
        "image": "",
        "link": ""
    })
}

pub fn faq() -> Value {
    json!({ "question": "", "answer": "" })
}

pub fn industry() -> Value {
    json!({
        "name": "",
        "slug": "",
        "category": "",
        "shortDesc": "",
        "image": "",
        "description": "",
        "features": [],
        "stats": []
    })
}

/// Empty row for the technical/dimensional data tables.
pub fn spec_row() -> Value {
    json!({ "name": "", "metric": "", "imperial": "" })
}

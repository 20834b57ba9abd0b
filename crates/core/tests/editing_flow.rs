//! End-to-end product editing flow against the session API: build a valid
//! document the way an operator would, section by section, and check the
//! resulting payload shape.

use catalog_core::mutation::keyed::KeyGen;
use catalog_core::{EditorSession, ProductDocument, SpecTable, UploadedFileDescriptor};
use serde_json::json;

fn fresh_session() -> EditorSession {
    EditorSession::with_keygen(
        catalog_core::document::defaults::new_product(),
        KeyGen::with_seed(1_700_000_000_000),
    )
}

#[test]
fn full_product_build_produces_valid_payload() {
    let mut s = fresh_session();

    s.set_text("slug", "square-drive-hydraulic-torque-wrench-tsl-series")
        .unwrap();
    s.set_text("countryLang", "en-ae").unwrap();
    s.set_text("product.id", "tsl-series").unwrap();
    s.set_text("product.name", "TSL Series").unwrap();
    s.set_text("product.category", "Hydraulic Torque Wrenches").unwrap();
    s.set_text("product.type", "Square Drive Type").unwrap();
    s.set_text("product.tagline", "Purpose-built to meet high-torque demands")
        .unwrap();
    s.set_text("product.description", "Square drive hydraulic torque wrench.")
        .unwrap();

    // hero image arrives via the upload adapter
    let hero = UploadedFileDescriptor {
        url: "https://cdn.example.com/tsl-hero.jpg".to_string(),
        size: 120_000,
        mimetype: "image/jpeg".to_string(),
        originalname: "tsl-hero.jpg".to_string(),
    };
    s.apply_upload("product.heroImage", &hero).unwrap();

    s.add_quick_spec().unwrap();
    s.update_item("product.quickSpecs", 0, "value", json!("1,020")).unwrap();
    s.update_item("product.quickSpecs", 0, "unit", json!("Nm")).unwrap();
    s.update_item("product.quickSpecs", 0, "label", json!("Max Torque")).unwrap();

    s.add_faq().unwrap();
    s.update_item("faqs", 0, "question", json!("What drive sizes are available?"))
        .unwrap();
    s.update_item("faqs", 0, "answer", json!("3/4\" and 1\" square drives."))
        .unwrap();

    s.add_accessory().unwrap();
    s.update_item("accessories", 0, "name", json!("Reaction Arm")).unwrap();
    s.add_feature_string("accessories", 0).unwrap();
    s.update_feature_string("accessories", 0, 0, "Hardened steel").unwrap();

    s.add_model().unwrap();
    s.update_model(0, "TSL-07").unwrap();
    let key = s.add_spec_field(SpecTable::Technical, "TSL-07").unwrap();
    s.update_spec_field(SpecTable::Technical, "TSL-07", &key, "Max Torque", "1,020 Nm", "752 ft-lb")
        .unwrap();

    let payload = s.into_document().expect("document should validate");

    // payload parses into the canonical wire shape
    let doc: ProductDocument = serde_json::from_value(payload.clone()).unwrap();
    assert_eq!(doc.slug, "square-drive-hydraulic-torque-wrench-tsl-series");
    assert_eq!(doc.product.hero_image, "https://cdn.example.com/tsl-hero.jpg");
    assert_eq!(doc.product.quick_specs.len(), 1);
    assert_eq!(doc.accessories[0].features, vec!["Hardened steel"]);
    assert_eq!(doc.technical_specifications.models, vec!["TSL-07"]);
    assert_eq!(payload["technicalSpecifications"]["technicalData"]["TSL-07"][&key]["imperial"], "752 ft-lb");
}

#[test]
fn editing_existing_document_preserves_identity_fields() {
    let existing = json!({
        "_id": "prod-1",
        "slug": "tsl-series",
        "isActive": true,
        "countryLang": "default",
        "product": {
            "id": "tsl", "name": "TSL Series", "category": "Wrenches",
            "type": "Square Drive", "tagline": "t", "description": "d",
            "heroImage": "", "quickSpecs": [], "documents": [], "stats": []
        },
        "features": { "mainFeatures": [], "detailedFeatures": [] },
        "media": { "video": { "type": "video", "title": "", "thumbnail": "", "videoUrl": "" }, "images": [] },
        "accessories": [], "relatedProducts": [], "caseStudies": [],
        "technicalSpecifications": { "models": [], "generalTechnicalDrawing": "", "technicalData": {}, "dimensionalData": {} },
        "faqs": [], "industries": [],
        "contact": {
            "sales": { "title": "Sales Inquiries", "phone": "", "email": "" },
            "support": { "title": "Technical Support", "availability": "", "email": "" },
            "officeHours": { "title": "Office Hours", "weekdays": "", "weekends": "", "email": "" },
            "industryOptions": []
        }
    });

    let mut s = EditorSession::from_document(existing);
    assert!(s.is_existing());
    s.set_text("product.tagline", "Updated tagline").unwrap();

    let payload = s.into_document().unwrap();
    assert_eq!(payload["_id"], "prod-1");
    assert_eq!(payload["slug"], "tsl-series");
    assert_eq!(payload["product"]["tagline"], "Updated tagline");
}

use chrono::NaiveDate;
use freight_docs::blocks::{Block, Field};
use freight_docs::canvas::DrawOp;
use freight_docs::compose::{
    ComposeContext, DocumentComposer, DocumentKind, Invoice, LogisticsReport, Section,
    TransportationRequest, WarehousingRequest,
};
use freight_docs::config::{EngineConfig, HeaderPolicy};
use freight_docs::engine::Engine;
use freight_docs::Info;

fn engine_with(config: EngineConfig) -> Engine {
    let _ = env_logger::builder().is_test(true).try_init();
    Engine::new(config)
        .expect("valid configuration")
        .with_date(NaiveDate::from_ymd_opt(2024, 5, 17).expect("valid date"))
}

fn engine() -> Engine {
    engine_with(EngineConfig::default())
}

/// A record with a single, arbitrarily long free-text section
struct Memo(String);

impl DocumentComposer for Memo {
    fn kind(&self) -> DocumentKind {
        DocumentKind::TransportationRequest
    }

    fn natural_id(&self) -> Option<String> {
        Some("MEMO-1".to_string())
    }

    fn sections(&self, _ctx: &ComposeContext<'_>) -> Vec<Section> {
        vec![
            Section::new("Summary").block(Field::new("Author", "Dispatch")),
            Section::new("Notes").block(Block::TextBlock(self.0.clone())),
        ]
    }
}

fn invoice() -> Invoice {
    serde_json::from_str(
        r#"{
            "id": "65f1c0ffee",
            "number": "INV-2024-001",
            "description": "Express delivery Warsaw to Berlin",
            "date": "2024-03-01",
            "amount": 1250.5,
            "status": "Unpaid",
            "dueDate": "2024-03-31"
        }"#,
    )
    .expect("valid invoice")
}

fn transportation_request(instructions: &str) -> TransportationRequest {
    let mut request: TransportationRequest = serde_json::from_str(
        r#"{
            "requestNumber": "TR-2024-0042",
            "status": "SUBMITTED",
            "priority": "HIGH",
            "serviceType": "EXPRESS_DELIVERY",
            "pickupLocation": {
                "address": { "street": "ul. Logistyczna 123", "city": "Warsaw", "country": "Poland" },
                "contactPerson": "Anna Nowak",
                "contactPhone": "+48 600 100 200"
            },
            "deliveryLocation": {
                "address": { "street": "Hafenstraße 7", "city": "Hamburg", "country": "Germany" },
                "contactPerson": "Jonas Weber",
                "contactPhone": "+49 40 123456"
            },
            "cargo": {
                "description": "Spare parts",
                "cargoType": "GENERAL_CARGO",
                "weight": 1200,
                "value": 15000,
                "currency": "EUR",
                "packaging": "PALLETS",
                "quantity": 4,
                "unitType": "pallets"
            },
            "requestedPickupDate": "2024-04-02T08:00:00Z",
            "requiresInsurance": true,
            "requiresCustomsClearance": false,
            "currency": "EUR",
            "estimatedCost": 1750
        }"#,
    )
    .expect("valid request");
    request.special_instructions = Some(instructions.to_string());
    request
}

fn warehousing_request() -> WarehousingRequest {
    serde_json::from_str(
        r#"{
            "requestNumber": "WR-2024-0007",
            "priority": "NORMAL",
            "storageType": "COLD_STORAGE",
            "securityLevel": "STANDARD",
            "estimatedVolume": 45.5,
            "estimatedWeight": 3000,
            "estimatedStorageDuration": { "value": 6, "unit": "months" },
            "billingType": "MONTHLY",
            "plannedStartDate": "2024-06-01",
            "plannedEndDate": "2024-12-01",
            "handlingServices": ["LOADING"],
            "cargo": { "description": "Frozen fish", "cargoType": "PERISHABLE", "packaging": "BOXES", "quantity": 120, "unitType": "boxes", "value": 0 },
            "finalCost": 3200
        }"#,
    )
    .expect("valid request")
}

fn report(routes: usize) -> LogisticsReport {
    let routes: Vec<String> = (0..routes)
        .map(|i| {
            format!(
                r#"{{ "route": "Route {i}", "shipments": {i}, "onTimePercentage": 90, "avgCost": 100, "totalRevenue": 1000 }}"#
            )
        })
        .collect();
    serde_json::from_str(&format!(
        r#"{{
            "dateRange": {{ "from": "2024-01-01", "to": "2024-03-31" }},
            "metrics": {{ "totalShipments": 1284, "onTimeDelivery": 94.3, "totalCost": 125400.5, "storageVolume": 12500 }},
            "routePerformance": [{}]
        }}"#,
        routes.join(",")
    ))
    .expect("valid report")
}

#[test]
fn every_kind_of_record_renders_under_its_natural_name() {
    let engine = engine();
    let invoice = invoice();
    let transport = transportation_request("Call before arrival");
    let warehousing = warehousing_request();
    let report = report(3);
    let cases: [(&dyn DocumentComposer, &str); 4] = [
        (&invoice, "Invoice_INV-2024-001.pdf"),
        (&transport, "Transportation_Request_TR-2024-0042.pdf"),
        (&warehousing, "Warehousing_Request_WR-2024-0007.pdf"),
        (&report, "Logistics_Report_20240101_20240331.pdf"),
    ];
    for (composer, expected) in cases {
        let output = engine.generate(composer).expect("renders");
        assert_eq!(output.file_name, expected);
        assert!(output.page_count >= 1);
        assert!(output.bytes.starts_with(b"%PDF-"));
    }
}

#[test]
fn footers_number_every_page_with_the_final_count() {
    let engine = engine();
    let memo = Memo(lipsum::lipsum(3000));
    let pages = engine.render_content(&memo, None).expect("content pass");
    let total = pages.page_count();
    assert!(total >= 3);

    let document = engine
        .stamp_footers(pages, Info::default())
        .expect("footer pass");
    assert_eq!(document.page_count(), total);
    for (i, page) in document.pages().iter().enumerate() {
        let numbers: Vec<&str> = page
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } if text.starts_with("Page ") => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(numbers, vec![format!("Page {} of {}", i + 1, total)]);
    }
}

#[test]
fn same_record_gives_identical_bytes() {
    let engine = engine();
    let request = transportation_request(&lipsum::lipsum(800));
    let first = engine.generate(&request).expect("renders");
    let second = engine.generate(&request).expect("renders");
    assert!(first.page_count > 1);
    assert_eq!(first, second);
}

#[test]
fn reusing_a_composer_starts_each_document_afresh() {
    let engine = engine();
    let memo = Memo(lipsum::lipsum(1500));
    let first = engine.render_content(&memo, None).expect("renders");
    let second = engine.render_content(&memo, None).expect("renders");
    assert_eq!(first.pages, second.pages);

    // the letterhead title is the first thing on page one, at the same spot both times
    let title = |pages: &freight_docs::canvas::PageSet| match pages.pages[0].ops.first() {
        Some(DrawOp::Text { text, y, .. }) => Some((text.clone(), *y)),
        _ => None,
    };
    assert_eq!(title(&first), title(&second));
    assert_eq!(
        title(&second).map(|(text, _)| text),
        Some("Transportation Request".to_string())
    );
}

#[test]
fn long_reports_continue_their_table_on_later_pages() {
    let output = engine().generate(&report(120)).expect("renders");
    assert!(output.page_count > 1);
}

#[test]
fn running_header_repeats_the_title_after_page_one() {
    let config = EngineConfig {
        header: HeaderPolicy::EveryPage,
        ..EngineConfig::default()
    };
    let engine = engine_with(config);
    let memo = Memo(lipsum::lipsum(2000));
    let pages = engine.render_content(&memo, None).expect("renders");
    assert!(pages.page_count() > 1);

    let title_count = |page: usize| {
        pages.pages[page]
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Text { text, .. } if text == "Transportation Request"))
            .count()
    };
    // page one has the letterhead title only
    assert_eq!(title_count(0), 1);
    for page in 1..pages.page_count() {
        assert_eq!(title_count(page), 1);
    }
}

#[test]
fn bookmarks_follow_the_sections() {
    let engine = engine();
    let pages = engine
        .render_content(&warehousing_request(), None)
        .expect("renders");
    let titles: Vec<&str> = pages
        .outline
        .entries
        .iter()
        .map(|entry| entry.title.as_str())
        .collect();
    assert_eq!(
        titles,
        vec![
            "Request Information",
            "Storage Information",
            "Cargo Information",
            "Service Requirements",
            "Pricing"
        ]
    );

    let config = EngineConfig {
        bookmarks: false,
        ..EngineConfig::default()
    };
    let pages = engine_with(config)
        .render_content(&warehousing_request(), None)
        .expect("renders");
    assert!(pages.outline.is_empty());
}

#[test]
fn reports_fit_narrow_paper() {
    let config = EngineConfig::from_json_str(r#"{ "page": { "size": "a5" } }"#).expect("valid");
    let engine = engine_with(config);
    let pages = engine.render_content(&report(3), None).expect("table shrinks to fit");
    let content_right = engine.geometry().content_right();
    for op in pages.pages.iter().flat_map(|page| page.ops.iter()) {
        if let DrawOp::Line { to, .. } = op {
            assert!(to.0 <= content_right);
        }
    }
}

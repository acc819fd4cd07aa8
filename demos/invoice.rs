use freight_docs::compose::Invoice;
use freight_docs::config::EngineConfig;
use freight_docs::engine::Engine;
use freight_docs::sink::DirectorySink;

fn main() {
    // RUST_LOG=debug shows page breaks and column scaling as they happen
    env_logger::init();

    // an optional JSON configuration file can be passed as the first argument
    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::from_json_file(path).expect("can read configuration"),
        None => EngineConfig::default(),
    };
    let engine = Engine::new(config).expect("configuration is valid");

    // records arrive as JSON from the API, so build one the same way
    let invoice: Invoice = serde_json::from_str(
        r#"{
            "_id": "65f1c0ffee",
            "number": "INV-2024-001",
            "description": "Express delivery of 4 pallets from Warsaw to Berlin, including unloading at the customer's dock",
            "date": "2024-03-01",
            "amount": 1250.5,
            "currency": "EUR",
            "status": "Unpaid",
            "dueDate": "2024-03-31"
        }"#,
    )
    .expect("invoice is valid JSON");

    // the document is written to the current directory under its natural name
    let mut sink = DirectorySink::new(".");
    let output = engine
        .generate_into(&invoice, &mut sink)
        .expect("can render and write the invoice");

    println!(
        "wrote {} ({} page{})",
        sink.path_for(&output.file_name).display(),
        output.page_count,
        if output.page_count == 1 { "" } else { "s" }
    );
}

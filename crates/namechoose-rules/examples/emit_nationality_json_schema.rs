use namechoose_rules::nationality_json_schema;

fn main() {
    let schema = nationality_json_schema();
    let json = serde_json::to_string_pretty(&schema).expect("serialize nationality json schema");
    println!("{json}");
}

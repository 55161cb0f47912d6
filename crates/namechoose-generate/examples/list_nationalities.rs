use namechoose_generate::{NationalityRegistry, default_data_root};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let registry = NationalityRegistry::load(&default_data_root())?;
    for descriptor in registry.list_all() {
        let codes: Vec<&str> = descriptor.identifiers().skip(1).collect();
        println!("{} ({})", descriptor.name(), codes.join(", "));
    }
    Ok(())
}

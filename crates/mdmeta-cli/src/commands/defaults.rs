use mdmeta_lib::EditorConfig;

pub fn run() {
    match EditorConfig::default().to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

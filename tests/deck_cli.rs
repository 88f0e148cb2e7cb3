use std::fs;
use std::path::Path;
use std::process::Command;

const BIN: &str = env!("CARGO_BIN_EXE_nyc-housing-deck");

const LISTINGS: &str = "\
BROKERTITLE,TYPE,PRICE,BEDS,BATH,PROPERTYSQFT,ADDRESS,STATE,SUBLOCALITY,STREET_NAME
Brokered by Douglas Elliman,Condo for sale,315000,2,2,1400,2 E 55th St,\"New York, NY 10022\",Manhattan,East 55th Street
Brokered by Serhant,Condo for sale,195000000,7,10,17545,Central Park Tower,\"New York, NY 10019\",New York County,West 57th Street
Brokered by Sowae Corp,House for sale,260000,4,2,2015,620 Sinclair Ave,\"Staten Island, NY 10312\",Richmond County,Sinclair Avenue
Brokered by COMPASS,Co-op for sale,69000,3,1,445,2 Shore Ln,\"Brooklyn, NY 11209\",Kings County,Shore Lane
Brokered by Wagner,Pending,55000000,7,2.373860858,14175,5 E 64th St,\"New York, NY 10065\",New York County,East 64th Street
";

fn build(input: &Path, out: &Path, extra: &[&str]) -> std::process::Output {
    Command::new(BIN)
        .arg("build")
        .arg(input)
        .arg("--out")
        .arg(out)
        .args(extra)
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to run nyc-housing-deck")
}

#[test]
fn builds_a_complete_deck() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("NY-Housing-Dataset.csv");
    fs::write(&input, LISTINGS).unwrap();
    let out = dir.path().join("deck");

    let res = build(&input, &out, &[]);
    assert!(res.status.success(), "{}", String::from_utf8_lossy(&res.stderr));

    let index = fs::read_to_string(out.join("index.html")).unwrap();
    assert!(index.contains("<button id=\"prevButton\" disabled>"));
    assert!(index.contains("Boroughs of New York Metropolitan Area"));
    assert!(index.contains("annotation-group"));

    let last = fs::read_to_string(out.join("scene4.html")).unwrap();
    assert!(last.contains("<button id=\"nextButton\" disabled>"));
    assert!(last.contains("id=\"borough-filter\""));

    assert!(out.join("scene3--new-york-county.html").is_file());
    assert!(out.join("scene4--richmond-county.html").is_file());

    let summary = fs::read_to_string(out.join("summary.txt")).unwrap();
    assert!(summary.starts_with("##Listings\t5\n"));
    assert!(summary.contains("New York County\t2\t"));

    assert!(dir.path().join("deck.zip").is_file());
}

#[test]
fn no_zip_skips_the_bundle() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("listings.csv");
    fs::write(&input, LISTINGS).unwrap();
    let out = dir.path().join("deck");

    let res = build(&input, &out, &["--no-zip"]);
    assert!(res.status.success());
    assert!(out.join("index.html").is_file());
    assert!(!dir.path().join("deck.zip").exists());
}

#[test]
fn malformed_data_still_writes_pages_with_a_message() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.csv");
    fs::write(
        &input,
        "price,beds,bath,propertysqft,sublocality,type\nlots,2,1,900,Queens,Condo for sale\n",
    )
    .unwrap();
    let out = dir.path().join("deck");

    let res = build(&input, &out, &["--no-zip"]);
    assert!(res.status.success());
    let page = fs::read_to_string(out.join("scene2.html")).unwrap();
    assert!(page.contains("class=\"chart-error\""));
    assert!(page.contains("Data could not be parsed"));
    assert!(!out.join("summary.txt").exists());
}

#[test]
fn missing_input_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    let res = build(&dir.path().join("absent.csv"), &dir.path().join("deck"), &[]);
    assert!(!res.status.success());
    assert!(String::from_utf8_lossy(&res.stderr).contains("input file not found"));
}

#[test]
fn current_dir_as_output_still_bundles() {
    let dir = tempfile::tempdir().unwrap();
    let deck = dir.path().join("deck");
    fs::create_dir_all(&deck).unwrap();
    fs::write(deck.join("listings.csv"), LISTINGS).unwrap();

    let res = Command::new(BIN)
        .current_dir(&deck)
        .args(["build", "listings.csv", "--out", ".", "--export-figures"])
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to run nyc-housing-deck");
    assert!(res.status.success(), "{}", String::from_utf8_lossy(&res.stderr));
    assert!(deck.join("index.html").is_file());
    assert!(deck.join("figures").join("scene1.pdf").is_file());
    assert!(dir.path().join("deck.zip").is_file());
}

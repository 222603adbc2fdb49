use prime_hash_table::HashTable;

fn show(label: &str, value: Option<&str>) {
    println!("{label}: {}", value.unwrap_or("(none)"));
}

fn main() {
    let mut t = HashTable::new();

    t.insert("name", "Son");
    t.insert("age", "25");
    t.insert("city", "Ha Noi");

    show("name", t.search("name"));
    show("age", t.search("age"));
    show("city", t.search("city"));

    t.insert("city", "Da Nang");
    show("updated city", t.search("city"));

    t.delete("age");
    show("age after deletion", t.search("age"));

    t.destroy();
}

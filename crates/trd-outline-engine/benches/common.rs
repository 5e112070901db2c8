// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_trd(sections: usize) -> String {
    let mut content = String::from("# Technical Requirements Document\n\n");

    for section in 0..sections {
        content.push_str(&format!("## Functional Requirements {section}\n\n"));
        content.push_str("Some paragraph content describing the area in plain words.\n\n");
        content.push_str("### Acceptance\n");
        for i in 0..3 {
            content.push_str(&format!("FR-{section}{i}: The system shall do thing {i}\n"));
            content.push_str(&format!("- Detail {i} with **emphasis**\n"));
        }
        content.push_str("\n| Metric | Target |\n|--------|--------|\n| Latency | 200ms |\n\n");
        if section % 3 == 0 {
            content.push_str("```mermaid\ngraph TD\n  A-->B\n```\n\n");
        }
    }

    content
}

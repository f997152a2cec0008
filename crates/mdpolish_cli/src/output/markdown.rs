//! Markdown report output

use mdpolish_core::export_to_markdown;

use crate::runner::Document;

pub fn output_markdown(documents: &[Document]) {
    for (i, document) in documents.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("<!-- {} -->", document.display);
        print!("{}", export_to_markdown(&document.result));
    }
}

use super::*;

fn page(body: &str) -> String {
    format!("<html><head><title>t</title></head><body>{body}</body></html>")
}

/* ------------ structured pass: tables ------------ */

#[test]
fn table_with_header_row_maps_columns() {
    let html = page(
        "<table>\
           <tr><th>Nome</th><th>Telefone</th><th>Email</th></tr>\
           <tr><td>João Silva</td><td>(11) 99999-9999</td><td>joao@email.com</td></tr>\
         </table>",
    );
    let outcome = extract_contacts(&html, "https://example.com.br");
    assert_eq!(outcome.records.len(), 1);
    let record = &outcome.records[0];
    assert_eq!(record.name, "João Silva");
    assert_eq!(record.phone, "(11) 99999-9999");
    assert_eq!(record.email, "joao@email.com");
    assert_eq!(record.source, "https://example.com.br");
    assert!(record.timestamp.is_some());
    assert!((outcome.confidence - 1.0).abs() < 1e-9);
    // the whole data row backs the record
    assert_eq!(outcome.source_elements.len(), 1);
    assert_eq!(outcome.source_elements[0].len(), 3);
}

#[test]
fn table_header_fills_missing_fields_from_other_cells() {
    // header only labels the name column; phone sits in an unlabeled cell
    let html = page(
        "<table>\
           <tr><th>Nome</th><th>Cargo</th></tr>\
           <tr><td>Ana Costa</td><td>Diretora (21) 3333-4444</td></tr>\
         </table>",
    );
    let outcome = extract_contacts(&html, "u");
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].name, "Ana Costa");
    assert_eq!(outcome.records[0].phone, "(21) 3333-4444");
}

#[test]
fn headerless_table_falls_back_to_cell_typing() {
    let html = page(
        "<table>\
           <tr><td>Maria Santos</td><td>(21) 3333-4444</td><td>maria@email.com</td></tr>\
           <tr><td>Bruno Dias</td><td>(31) 98888-7777</td><td>bruno@email.com</td></tr>\
         </table>",
    );
    let outcome = extract_contacts(&html, "u");
    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.records[0].name, "Maria Santos");
    assert_eq!(outcome.records[0].phone, "(21) 3333-4444");
    assert_eq!(outcome.records[1].email, "bruno@email.com");
}

#[test]
fn table_with_mixed_cells_falls_back_to_row_text() {
    // a single cell holding everything defeats per-cell typing
    let html = page(
        "<table>\
           <tr><td>Carlos Mendes - (51) 95555-5555 - carlos@email.com</td></tr>\
         </table>",
    );
    let outcome = extract_contacts(&html, "u");
    assert_eq!(outcome.records.len(), 1);
    let record = &outcome.records[0];
    assert_eq!(record.name, "Carlos Mendes");
    assert_eq!(record.phone, "(51) 95555-5555");
    assert_eq!(record.email, "carlos@email.com");
}

#[test]
fn table_elements_are_not_rescanned_by_free_text_pass() {
    let html = page(
        "<table>\
           <tr><th>Nome</th><th>Email</th></tr>\
           <tr><td>João Silva</td><td>joao@email.com</td></tr>\
         </table>",
    );
    let outcome = extract_contacts(&html, "u");
    // one record from the table, none duplicated from free text
    assert_eq!(outcome.records.len(), 1);
}

/* ------------ structured pass: lists ------------ */

#[test]
fn list_items_split_fields_per_item() {
    let html = page(
        "<ul>\
           <li>Carlos Mendes - (51) 95555-5555 - carlos@email.com</li>\
           <li>Lucia Ferreira - (61) 94444-4444 - lucia@email.com</li>\
         </ul>",
    );
    let outcome = extract_contacts(&html, "u");
    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.records[0].name, "Carlos Mendes");
    assert_eq!(outcome.records[0].phone, "(51) 95555-5555");
    assert_eq!(outcome.records[0].email, "carlos@email.com");
    assert_eq!(outcome.records[1].name, "Lucia Ferreira");
    assert_eq!(outcome.records[1].phone, "(61) 94444-4444");
    assert_eq!(outcome.records[1].email, "lucia@email.com");
}

#[test]
fn list_items_prefer_semantic_hints() {
    let html = page(
        "<ul><li>\
           <strong>Pedro Alves</strong>\
           <span class=\"phone\">(31) 98888-7777</span>\
           <a href=\"mailto:Pedro.Alves@Email.com?subject=oi\">escreva</a>\
         </li></ul>",
    );
    let outcome = extract_contacts(&html, "u");
    assert_eq!(outcome.records.len(), 1);
    let record = &outcome.records[0];
    assert_eq!(record.name, "Pedro Alves");
    assert_eq!(record.phone, "(31) 98888-7777");
    // mailto href target wins over the rendered link text
    assert_eq!(record.email, "pedro.alves@email.com");
}

#[test]
fn hinted_list_item_fills_missing_fields_from_full_text() {
    let html = page(
        "<ul><li><a href=\"mailto:rh@empresa.com.br\">fale conosco</a> Maria Santos</li></ul>",
    );
    let outcome = extract_contacts(&html, "u");
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].email, "rh@empresa.com.br");
    assert_eq!(outcome.records[0].name, "Maria Santos");
}

#[test]
fn definition_list_accumulates_one_record() {
    let html = page(
        "<dl>\
           <dt>Nome</dt><dd>João Silva</dd>\
           <dt>Telefone</dt><dd>(11) 99999-9999</dd>\
           <dt>Email</dt><dd>joao@email.com</dd>\
         </dl>",
    );
    let outcome = extract_contacts(&html, "u");
    assert_eq!(outcome.records.len(), 1);
    let record = &outcome.records[0];
    assert_eq!(record.name, "João Silva");
    assert_eq!(record.phone, "(11) 99999-9999");
    assert_eq!(record.email, "joao@email.com");
}

#[test]
fn definition_list_without_labels_still_recognizes_fields() {
    let html = page(
        "<dl>\
           <dt>Responsável</dt><dd>Ana Costa</dd>\
           <dt>Falar com</dt><dd>(21) 3333-4444</dd>\
         </dl>",
    );
    let outcome = extract_contacts(&html, "u");
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].name, "Ana Costa");
    assert_eq!(outcome.records[0].phone, "(21) 3333-4444");
}

/* ------------ free-text pass ------------ */

#[test]
fn fragments_sharing_an_email_merge_into_one_record() {
    let html = page(
        "<p>João Silva - joao@email.com - (11) 99999-9999</p>\
         <p>João Silva - joao@email.com</p>",
    );
    let outcome = extract_contacts(&html, "u");
    assert_eq!(outcome.records.len(), 1);
    let record = &outcome.records[0];
    assert_eq!(record.name, "João Silva");
    assert_eq!(record.phone, "(11) 99999-9999");
    assert_eq!(record.email, "joao@email.com");
    // both paragraphs back the merged record
    assert_eq!(outcome.source_elements[0].len(), 2);
}

#[test]
fn loose_merge_joins_fragments_even_without_name_agreement() {
    let html = page(
        "<p>ramal direto: (41) 97777-6666</p>\
         <p>Bruno Dias - (41) 97777-6666 - bruno@email.com</p>",
    );
    let outcome = extract_contacts(&html, "u");
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].name, "Bruno Dias");
    assert_eq!(outcome.records[0].phone, "(41) 97777-6666");
}

#[test]
fn script_content_is_never_scanned() {
    let html = page(
        "<script>var x=\"João Silva - (11) 99999-9999\"</script>\
         <p>Maria Santos - (21) 88888-8888 - maria@email.com</p>",
    );
    let outcome = extract_contacts(&html, "u");
    assert_eq!(outcome.records.len(), 1);
    let record = &outcome.records[0];
    assert_eq!(record.name, "Maria Santos");
    assert_eq!(record.email, "maria@email.com");
    // (21) 88888-8888 is 11 digits without the mobile 9 marker: invalid
    assert_eq!(record.phone, "");
}

#[test]
fn chrome_and_navigation_classes_are_skipped() {
    let html = page(
        "<div class=\"sidebar\">Ana Costa - ana@email.com</div>\
         <div class=\"main-nav\">Bruno Dias - bruno@email.com</div>\
         <div class=\"ad-banner\">Carla Lima - carla@email.com</div>\
         <div class=\"content\">Pedro Alves - pedro@email.com</div>",
    );
    let outcome = extract_contacts(&html, "u");
    assert_eq!(outcome.records.len(), 1);
    assert_eq!(outcome.records[0].name, "Pedro Alves");
}

#[test]
fn short_text_blocks_are_skipped() {
    let html = page("<p>abcd</p><p>oi</p>");
    let outcome = extract_contacts(&html, "u");
    assert!(outcome.records.is_empty());
}

#[test]
fn orphan_records_are_emitted_when_nothing_pairs() {
    let html = page("<p>fale: joao@email.com ou (11) 99999-9999</p>");
    let outcome = extract_contacts(&html, "u");
    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.records[0].email, "joao@email.com");
    assert_eq!(outcome.records[0].name, "");
    assert_eq!(outcome.records[1].phone, "(11) 99999-9999");
    assert!((outcome.confidence - 0.3).abs() < 1e-9);
}

#[test]
fn parallel_enumerations_zip_positionally() {
    let html = page(
        "<p>Equipe: Ana Costa e Bruno Dias. \
          Telefones: (11) 99999-9999 e (21) 98888-7777. \
          Emails: ana@email.com e bruno@email.com</p>",
    );
    let outcome = extract_contacts(&html, "u");
    assert_eq!(outcome.records.len(), 2);
    assert_eq!(outcome.records[0].name, "Ana Costa");
    assert_eq!(outcome.records[0].phone, "(11) 99999-9999");
    assert_eq!(outcome.records[0].email, "ana@email.com");
    assert_eq!(outcome.records[1].name, "Bruno Dias");
    assert_eq!(outcome.records[1].phone, "(21) 98888-7777");
    assert_eq!(outcome.records[1].email, "bruno@email.com");
}

/* ------------ edges ------------ */

#[test]
fn empty_page_yields_empty_outcome() {
    let outcome = extract_contacts("<html><body></body></html>", "u");
    assert!(outcome.records.is_empty());
    assert!(outcome.source_elements.is_empty());
    assert_eq!(outcome.confidence, 0.0);
}

#[test]
fn garbage_input_never_panics() {
    for html in ["", "<<<>>>", "<table><tr>", "\u{0}\u{1}"] {
        let outcome = extract_contacts(html, "u");
        assert!(outcome.confidence >= 0.0);
    }
}

#[test]
fn confidence_reflects_partial_records() {
    // name + email only
    let html = page("<p>Maria Santos - maria@email.com</p>");
    let outcome = extract_contacts(&html, "u");
    assert_eq!(outcome.records.len(), 1);
    assert!((outcome.confidence - 0.7).abs() < 1e-9);
}

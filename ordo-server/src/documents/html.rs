//! HTML fragment renderer
//!
//! Renders the section list into a self-contained, inline-styled HTML
//! fragment. Output is a pure function of the document (the issue date is
//! part of it), so re-rendering an unchanged document yields the identical
//! string.

use shared::models::Address;

use super::model::OrderDocument;
use super::sections::{
    CustomerBlock, Letterhead, MaterialEntry, OrderHeader, Section, ServiceEntry, SignatureBlock,
    SummaryTable, fmt_money,
};

/// Escape text interpolated into the fragment
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Show "-" for blank values, as the printed form does
fn or_dash(text: &str) -> String {
    if text.trim().is_empty() {
        "-".to_string()
    } else {
        escape(text)
    }
}

pub struct HtmlRenderer;

impl HtmlRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render the full fragment
    pub fn render(&self, document: &OrderDocument) -> String {
        let mut out = String::with_capacity(4096);
        out.push_str(
            "<div style=\"font-family: Arial, sans-serif; max-width: 800px; margin: 0 auto; padding: 20px;\">\n",
        );
        for section in document.sections() {
            match section {
                Section::Letterhead(s) => self.render_letterhead(&mut out, &s),
                Section::OrderHeader(s) => self.render_order_header(&mut out, &s),
                Section::Customer(s) => self.render_customer(&mut out, &s),
                Section::JobAddress(s) => self.render_address(&mut out, &s),
                Section::Services(s) => self.render_services(&mut out, &s),
                Section::Materials(s) => self.render_materials(&mut out, &s),
                Section::Summary(s) => self.render_summary(&mut out, &s),
                Section::Signatures(s) => self.render_signatures(&mut out, &s),
            }
        }
        out.push_str("</div>\n");
        out
    }

    fn render_letterhead(&self, out: &mut String, s: &Letterhead) {
        out.push_str(
            "<div style=\"display: flex; justify-content: space-between; margin-bottom: 30px; border-bottom: 2px solid #000; padding-bottom: 20px;\">\n",
        );
        out.push_str("<div style=\"text-align: left;\">\n");
        out.push_str(&format!("<h2 style=\"margin: 0;\">{}</h2>\n", or_dash(&s.company_name)));
        out.push_str(&format!("<p style=\"margin: 5px 0;\">CNPJ: {}</p>\n", or_dash(&s.tax_id)));
        out.push_str(&format!("<p style=\"margin: 5px 0;\">Tel: {}</p>\n", or_dash(&s.phone)));
        out.push_str(&format!("<p style=\"margin: 5px 0;\">Email: {}</p>\n", or_dash(&s.email)));
        out.push_str("</div>\n");
        if let Some(logo) = &s.logo {
            out.push_str(&format!(
                "<img src=\"{}\" alt=\"Logo\" style=\"max-height: 100px; max-width: 200px; object-fit: contain;\"/>\n",
                logo.as_data_uri()
            ));
        }
        out.push_str("</div>\n");
    }

    fn render_order_header(&self, out: &mut String, s: &OrderHeader) {
        out.push_str("<div style=\"text-align: right; margin-bottom: 20px;\">\n");
        out.push_str(&format!(
            "<h1 style=\"margin: 0;\">Ordem de Serviço #{}</h1>\n",
            escape(&s.label)
        ));
        out.push_str(&format!("<p>Data: {}</p>\n", escape(&s.issue_date)));
        out.push_str("</div>\n");
    }

    fn render_customer(&self, out: &mut String, s: &CustomerBlock) {
        out.push_str("<div style=\"margin-bottom: 30px;\">\n");
        out.push_str(&section_title("Informações do Cliente"));
        out.push_str(&format!(
            "<p style=\"margin: 5px 0;\"><strong>Nome:</strong> {}</p>\n",
            or_dash(&s.name)
        ));
        out.push_str(&format!(
            "<p style=\"margin: 5px 0;\"><strong>Telefone:</strong> {}</p>\n",
            or_dash(&s.phone)
        ));
        out.push_str("</div>\n");
    }

    fn render_address(&self, out: &mut String, s: &Address) {
        out.push_str("<div style=\"margin-bottom: 30px;\">\n");
        out.push_str(&section_title("Endereço"));
        out.push_str(&format!(
            "<p style=\"margin: 5px 0;\">{}, {}</p>\n",
            or_dash(&s.street),
            or_dash(&s.number)
        ));
        if let Some(complement) = &s.complement
            && !complement.is_empty()
        {
            out.push_str(&format!(
                "<p style=\"margin: 5px 0;\">Complemento: {}</p>\n",
                escape(complement)
            ));
        }
        out.push_str(&format!(
            "<p style=\"margin: 5px 0;\">{} - {} - {}</p>\n",
            or_dash(&s.neighborhood),
            or_dash(&s.city),
            or_dash(&s.state)
        ));
        out.push_str(&format!(
            "<p style=\"margin: 5px 0;\">CEP: {}</p>\n",
            or_dash(&s.zip_code)
        ));
        out.push_str("</div>\n");
    }

    fn render_services(&self, out: &mut String, entries: &[ServiceEntry]) {
        out.push_str("<div style=\"margin-bottom: 30px;\">\n");
        out.push_str(&section_title("Serviços"));
        for entry in entries {
            out.push_str(
                "<div style=\"margin-bottom: 15px; padding: 10px; background-color: #f9fafb; border-radius: 4px;\">\n",
            );
            out.push_str(&format!(
                "<p style=\"margin: 5px 0;\"><strong>Serviço:</strong> {}</p>\n",
                or_dash(&entry.name)
            ));
            out.push_str(&format!(
                "<p style=\"margin: 5px 0;\"><strong>Valor:</strong> {}</p>\n",
                fmt_money(entry.price)
            ));
            if let Some(description) = &entry.description
                && !description.is_empty()
            {
                out.push_str(&format!(
                    "<p style=\"margin: 5px 0;\"><strong>Descrição:</strong> {}</p>\n",
                    escape(description)
                ));
            }
            out.push_str("</div>\n");
        }
        out.push_str("</div>\n");
    }

    fn render_materials(&self, out: &mut String, entries: &[MaterialEntry]) {
        out.push_str("<div style=\"margin-bottom: 30px;\">\n");
        out.push_str(&section_title("Materiais Utilizados"));
        if entries.is_empty() {
            out.push_str("<p>Nenhum material utilizado</p>\n</div>\n");
            return;
        }
        out.push_str("<table style=\"width: 100%; border-collapse: collapse;\">\n<thead>\n");
        out.push_str("<tr style=\"background-color: #f3f4f6;\">");
        out.push_str(&th("left", "Material"));
        out.push_str(&th("center", "Qtd."));
        out.push_str(&th("right", "Valor Unit."));
        out.push_str(&th("right", "Total"));
        out.push_str("</tr>\n</thead>\n<tbody>\n");
        for entry in entries {
            out.push_str("<tr>");
            out.push_str(&td("left", &or_dash(&entry.name)));
            out.push_str(&td(
                "center",
                &format!("{} {}", entry.quantity, escape(&entry.unit)),
            ));
            out.push_str(&td("right", &fmt_money(entry.unit_price)));
            out.push_str(&td("right", &fmt_money(entry.line_total)));
            out.push_str("</tr>\n");
        }
        out.push_str("</tbody>\n</table>\n</div>\n");
    }

    fn render_summary(&self, out: &mut String, s: &SummaryTable) {
        out.push_str("<div style=\"margin-bottom: 30px; page-break-inside: avoid;\">\n");
        out.push_str(&section_title("Resumo do Orçamento"));
        out.push_str("<table style=\"width: 100%; margin-top: 10px;\">\n");
        out.push_str(&summary_row("Serviços:", &fmt_money(s.services_total), false));
        out.push_str(&summary_row("Materiais:", &fmt_money(s.materials_total), false));
        out.push_str(&summary_row("Desconto:", &fmt_money(s.discount), false));
        out.push_str(&summary_row("Total:", &fmt_money(s.total), true));
        out.push_str("</table>\n</div>\n");
    }

    fn render_signatures(&self, out: &mut String, s: &SignatureBlock) {
        out.push_str("<div style=\"margin-top: 50px; page-break-inside: avoid;\">\n");
        out.push_str(
            "<div style=\"display: flex; justify-content: space-between; margin-top: 100px;\">\n",
        );
        out.push_str("<div style=\"width: 45%; text-align: center;\">");
        out.push_str("<div style=\"border-top: 1px solid #000; padding-top: 5px;\">");
        out.push_str(&format!(
            "{}<br>CNPJ: {}",
            or_dash(&s.company_name),
            or_dash(&s.company_tax_id)
        ));
        out.push_str("</div></div>\n");
        out.push_str("<div style=\"width: 45%; text-align: center;\">");
        out.push_str("<div style=\"border-top: 1px solid #000; padding-top: 5px;\">");
        out.push_str(&format!("{}<br>Cliente", or_dash(&s.customer_name)));
        out.push_str("</div></div>\n");
        out.push_str("</div>\n</div>\n");
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn section_title(title: &str) -> String {
    format!(
        "<h3 style=\"border-bottom: 1px solid #ccc; padding-bottom: 5px;\">{}</h3>\n",
        title
    )
}

fn th(align: &str, text: &str) -> String {
    format!(
        "<th style=\"padding: 8px; text-align: {}; border: 1px solid #ddd;\">{}</th>",
        align, text
    )
}

fn td(align: &str, text: &str) -> String {
    format!(
        "<td style=\"padding: 8px; text-align: {}; border: 1px solid #ddd;\">{}</td>",
        align, text
    )
}

fn summary_row(label: &str, value: &str, emphasized: bool) -> String {
    if emphasized {
        format!(
            "<tr style=\"font-size: 1.2em;\"><td style=\"padding: 5px; border-top: 2px solid #000;\"><strong>{}</strong></td><td style=\"text-align: right; border-top: 2px solid #000;\">{}</td></tr>\n",
            label, value
        )
    } else {
        format!(
            "<tr><td style=\"padding: 5px;\"><strong>{}</strong></td><td style=\"text-align: right;\">{}</td></tr>\n",
            label, value
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::model::{
        DocumentSource, DraftMaterialLine, DraftOrder, DraftServiceLine, OrderDocument,
    };
    use chrono::NaiveDate;
    use shared::models::{Address, CompanyInfo, Material};

    fn document_fixture() -> OrderDocument {
        OrderDocument::assemble(
            DocumentSource::Draft(DraftOrder {
                customer_name: "Maria & Filhos <Ltda>".to_string(),
                customer_phone: None,
                address: Address::default(),
                services: vec![DraftServiceLine {
                    service_name: Some("Limpeza".to_string()),
                    price_raw: "45,00".to_string(),
                    description: Some("Split 12000 BTUs".to_string()),
                }],
                materials: vec![DraftMaterialLine {
                    material: Material {
                        id: None,
                        name: "Gás R410".to_string(),
                        unit: "kg".to_string(),
                        default_price: 10.0,
                        is_custom: false,
                    },
                    quantity: 3,
                }],
                discount_raw: Some("5".to_string()),
            }),
            CompanyInfo::default(),
            None,
            NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        )
    }

    #[test]
    fn render_is_deterministic() {
        let doc = document_fixture();
        let renderer = HtmlRenderer::new();
        assert_eq!(renderer.render(&doc), renderer.render(&doc));
    }

    #[test]
    fn summary_shows_all_four_figures() {
        let html = HtmlRenderer::new().render(&document_fixture());
        assert!(html.contains("R$ 45.00"));
        assert!(html.contains("R$ 30.00"));
        assert!(html.contains("R$ 5.00"));
        assert!(html.contains("R$ 70.00"));
    }

    #[test]
    fn customer_text_is_escaped() {
        let html = HtmlRenderer::new().render(&document_fixture());
        assert!(html.contains("Maria &amp; Filhos &lt;Ltda&gt;"));
        assert!(!html.contains("<Ltda>"));
    }

    #[test]
    fn material_table_lists_quantity_with_unit() {
        let html = HtmlRenderer::new().render(&document_fixture());
        assert!(html.contains("3 kg"));
        assert!(html.contains("R$ 10.00"));
    }

    #[test]
    fn empty_material_list_prints_placeholder() {
        let mut doc = document_fixture();
        doc.materials.clear();
        let html = HtmlRenderer::new().render(&doc);
        assert!(html.contains("Nenhum material utilizado"));
    }

    #[test]
    fn header_carries_label_and_date() {
        let html = HtmlRenderer::new().render(&document_fixture());
        assert!(html.contains("Ordem de Serviço #NOVA"));
        assert!(html.contains("Data: 05/01/2026"));
    }
}

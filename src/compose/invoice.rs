use super::{ComposeContext, DocumentComposer, DocumentKind, Section};
use crate::blocks::Field;
use crate::format::DateInput;
use crate::units::mm;
use serde::Deserialize;

/// Invoice values are wrapped to a narrow column
const INVOICE_WRAP_WIDTH: f32 = 80.0;

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    #[serde(alias = "_id")]
    pub id: String,
    pub number: String,
    pub description: String,
    pub date: DateInput,
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub status: String,
    pub due_date: DateInput,
}

impl DocumentComposer for Invoice {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Invoice
    }

    fn natural_id(&self) -> Option<String> {
        Some(self.number.clone())
    }

    fn sections(&self, ctx: &ComposeContext<'_>) -> Vec<Section> {
        let width = mm(INVOICE_WRAP_WIDTH);
        let details = Section::new("Invoice Details")
            .block(Field::new("Invoice Number", self.number.as_str()).stacked_within(width))
            .block(Field::new("Invoice ID", self.id.as_str()).stacked_within(width))
            .block(Field::new("Description", self.description.as_str()).stacked_within(width))
            .block(
                Field::new("Amount", ctx.money(self.amount, &self.currency))
                    .strong()
                    .stacked_within(width),
            )
            .block(Field::new("Status", ctx.label(&self.status)).stacked_within(width))
            .block(Field::new("Invoice Date", ctx.date(Some(&self.date))).stacked_within(width))
            .block(Field::new("Due Date", ctx.date(Some(&self.due_date))).stacked_within(width));
        vec![details]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{Block, FieldLayout};
    use crate::config::TableWidths;
    use crate::format::{LabelCatalog, Locale};

    #[test]
    fn invoice_details_are_stacked_in_a_narrow_column() {
        let invoice: Invoice = serde_json::from_str(
            r#"{
                "_id": "65f1c0ffee",
                "number": "INV-2024-001",
                "description": "Express delivery Warsaw to Berlin",
                "date": "2024-03-01T10:00:00Z",
                "amount": 1250.5,
                "status": "Unpaid",
                "dueDate": "2024-03-31"
            }"#,
        )
        .expect("valid invoice");
        let (locale, labels, tables) = (Locale::default(), LabelCatalog::default(), TableWidths::default());
        let ctx = ComposeContext {
            locale: &locale,
            labels: &labels,
            tables: &tables,
            content_width: crate::units::mm(170.0),
        };

        let sections = invoice.sections(&ctx);
        assert_eq!(sections.len(), 1);
        let fields: Vec<&Field> = sections[0]
            .blocks
            .iter()
            .filter_map(|block| match block {
                Block::Field(field) => Some(field),
                _ => None,
            })
            .collect();
        let labels: Vec<&str> = fields.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Invoice Number", "Invoice ID", "Description", "Amount", "Status", "Invoice Date", "Due Date"]
        );
        assert_eq!(fields[3].value.as_deref(), Some("$1,250.50"));
        assert_eq!(fields[6].value.as_deref(), Some("March 31, 2024"));
        assert!(fields
            .iter()
            .all(|f| f.layout == FieldLayout::Stacked { wrap_width: Some(mm(80.0)) }));
        assert_eq!(invoice.natural_id().as_deref(), Some("INV-2024-001"));
    }
}

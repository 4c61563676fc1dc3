use stocksync_core::{ProductId, VariantId};

/// One sellable unit: a plain product, or one variant of a product.
///
/// The variant id and its choice labels travel together, so an entry can never
/// carry one without the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    name: String,
    product_id: ProductId,
    variant: Option<VariantSelection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSelection {
    pub variant_id: VariantId,
    pub choice_labels: Vec<String>,
}

impl CatalogEntry {
    pub fn product(name: impl Into<String>, product_id: ProductId) -> Self {
        Self {
            name: name.into(),
            product_id,
            variant: None,
        }
    }

    pub fn variant(
        name: impl Into<String>,
        product_id: ProductId,
        variant_id: VariantId,
        choice_labels: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            product_id,
            variant: Some(VariantSelection {
                variant_id,
                choice_labels,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn variant_id(&self) -> Option<VariantId> {
        self.variant.as_ref().map(|v| v.variant_id)
    }

    pub fn choice_labels(&self) -> Option<&[String]> {
        self.variant.as_ref().map(|v| v.choice_labels.as_slice())
    }

    /// Choice labels joined with `-` (e.g. `Matte Black-Smoke`).
    pub fn choice_label(&self) -> Option<String> {
        self.choice_labels().map(|labels| labels.join("-"))
    }

    /// `name | choices` for variants, `name` for plain products.
    pub fn display_name(&self) -> String {
        match self.choice_label() {
            Some(label) => format!("{} | {}", self.name, label),
            None => self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn display_name_includes_choices_only_for_variants() {
        let product_id = ProductId::from_uuid(Uuid::from_u128(1));
        let plain = CatalogEntry::product("Lens cloth", product_id);
        assert_eq!(plain.display_name(), "Lens cloth");
        assert_eq!(plain.variant_id(), None);
        assert_eq!(plain.choice_labels(), None);

        let variant = CatalogEntry::variant(
            "VUORI FRAME",
            product_id,
            VariantId::from_uuid(Uuid::from_u128(2)),
            vec!["Matte".to_string(), "Black".to_string()],
        );
        assert_eq!(variant.display_name(), "VUORI FRAME | Matte-Black");
        assert!(variant.variant_id().is_some());
    }
}

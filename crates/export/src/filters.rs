/// Human-readable description of the filters a report was produced under,
/// shown in the banner of printable pages.
#[derive(Debug, Clone, Default)]
pub struct ExportFilters {
    pub article: Option<String>,
    pub kind: Option<String>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub description: Option<String>,
}

impl ExportFilters {
    /// `None` when no filter is active.
    pub fn summary(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(article) = &self.article {
            parts.push(format!("Artículo: {article}"));
        }
        if let Some(kind) = &self.kind {
            parts.push(format!("Tipo: {kind}"));
        }
        match (self.month, self.year) {
            (Some(month), Some(year)) => parts.push(format!("Período: {month:02}/{year}")),
            (Some(month), None) => parts.push(format!("Mes: {month:02}")),
            (None, Some(year)) => parts.push(format!("Año: {year}")),
            (None, None) => {}
        }
        if let Some(description) = &self.description {
            parts.push(format!("Descripción: \"{description}\""));
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" | "))
        }
    }
}

use crate::error::{Error, Result};
use crate::models::candidate::Candidate;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rgb,
};
use rust_xlsxwriter::{Color as XlsxColor, Format, FormatAlign, FormatBorder, Workbook};
use serde_json::Value as JsonValue;

const PAGE_WIDTH: f64 = 210.0;
const PAGE_HEIGHT: f64 = 297.0;
const MARGIN: f64 = 20.0;
const MM_PER_PT: f64 = 0.352_778;

/// Fixed visual templates for the resume export. Selection comes from the
/// client's persisted preference; `classic` is the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeTemplate {
    Classic,
    Modern,
    Compact,
}

impl ResumeTemplate {
    pub fn from_name(name: Option<&str>) -> Self {
        match name.map(|n| n.to_ascii_lowercase()).as_deref() {
            Some("modern") => ResumeTemplate::Modern,
            Some("compact") => ResumeTemplate::Compact,
            _ => ResumeTemplate::Classic,
        }
    }

    fn accent(&self) -> Color {
        let (r, g, b) = match self {
            ResumeTemplate::Classic => (0.12, 0.16, 0.23), // slate
            ResumeTemplate::Modern => (0.05, 0.44, 0.75),  // blue
            ResumeTemplate::Compact => (0.13, 0.37, 0.31), // green
        };
        Color::Rgb(Rgb::new(r, g, b, None))
    }

    fn body_size(&self) -> f64 {
        match self {
            ResumeTemplate::Compact => 9.0,
            _ => 10.5,
        }
    }

    fn heading_size(&self) -> f64 {
        match self {
            ResumeTemplate::Compact => 11.0,
            _ => 13.0,
        }
    }

    fn name_size(&self) -> f64 {
        match self {
            ResumeTemplate::Classic => 22.0,
            ResumeTemplate::Modern => 24.0,
            ResumeTemplate::Compact => 18.0,
        }
    }

    fn section_gap(&self) -> f64 {
        match self {
            ResumeTemplate::Compact => 4.0,
            _ => 7.0,
        }
    }

    fn rules_under_headings(&self) -> bool {
        !matches!(self, ResumeTemplate::Modern)
    }
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

/// Writing cursor over an A4 page; opens a fresh page whenever a block
/// would cross the bottom margin.
struct PageCursor<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f64,
}

impl<'a> PageCursor<'a> {
    fn new(doc: &'a PdfDocumentReference, layer: PdfLayerReference) -> Self {
        Self {
            doc,
            layer,
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn ensure_space(&mut self, needed: f64) {
        if self.y - needed < MARGIN {
            let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH as f32), Mm(PAGE_HEIGHT as f32), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - MARGIN;
        }
    }

    fn advance(&mut self, by: f64) {
        self.y -= by;
    }

    fn text(&mut self, text: &str, font: &IndirectFontRef, size: f64, color: &Color, indent: f64) {
        let line_height = size * MM_PER_PT * 1.45;
        self.ensure_space(line_height);
        self.layer.set_fill_color(color.clone());
        self.layer
            .use_text(text, size as f32, Mm((MARGIN + indent) as f32), Mm((self.y - line_height) as f32), font);
        self.y -= line_height;
    }

    fn paragraph(
        &mut self,
        text: &str,
        font: &IndirectFontRef,
        size: f64,
        color: &Color,
        indent: f64,
    ) {
        let usable = PAGE_WIDTH - 2.0 * MARGIN - indent;
        let max_chars = ((usable / (size * MM_PER_PT * 0.48)) as usize).max(20);
        for line in wrap_text(text, max_chars) {
            self.text(&line, font, size, color, indent);
        }
    }

    fn rule(&mut self, color: &Color, thickness: f64) {
        self.ensure_space(2.0);
        let line = Line {
            points: vec![
                (Point::new(Mm(MARGIN as f32), Mm(self.y as f32)), false),
                (Point::new(Mm((PAGE_WIDTH - MARGIN) as f32), Mm(self.y as f32)), false),
            ],
            is_closed: false,
        };
        self.layer.set_outline_color(color.clone());
        self.layer.set_outline_thickness(thickness as f32);
        self.layer.add_line(line);
        self.y -= 2.0;
    }
}

/// Greedy word wrap; words longer than the limit get their own line.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for source_line in text.lines() {
        let mut current = String::new();
        for word in source_line.split_whitespace() {
            if current.is_empty() {
                current = word.to_string();
            } else if current.len() + 1 + word.len() <= max_chars {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(current);
                current = word.to_string();
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

/// Decode a JSON-text column into entries. The column holds either a JSON
/// array, a single JSON object, or free text from the original form.
fn entries_from_text(raw: &str) -> Vec<JsonValue> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<JsonValue>(trimmed) {
        Ok(JsonValue::Array(items)) => items,
        Ok(obj @ JsonValue::Object(_)) => vec![obj],
        Ok(JsonValue::String(s)) => vec![JsonValue::String(s)],
        _ => vec![JsonValue::String(trimmed.to_string())],
    }
}

fn entry_field<'v>(entry: &'v JsonValue, keys: &[&str]) -> Option<&'v str> {
    for key in keys {
        if let Some(value) = entry.get(key).and_then(JsonValue::as_str) {
            if !value.trim().is_empty() {
                return Some(value);
            }
        }
    }
    None
}

pub struct ExportService;

impl ExportService {
    /// Render a candidate's resume as PDF bytes. Pure function of
    /// (candidate, template, logo); no state, no side effects.
    pub fn render_resume_pdf(
        candidate: &Candidate,
        template: ResumeTemplate,
        logo_png: Option<&[u8]>,
    ) -> Result<Vec<u8>> {
        let full_name = format!("{} {}", candidate.first_name, candidate.last_name);
        let (doc, page, layer) =
            PdfDocument::new(format!("Resume - {}", full_name), Mm(PAGE_WIDTH as f32), Mm(PAGE_HEIGHT as f32), "Layer 1");

        let fonts = Fonts {
            regular: doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(|e| Error::Pdf(e.to_string()))?,
            bold: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(|e| Error::Pdf(e.to_string()))?,
            italic: doc
                .add_builtin_font(BuiltinFont::HelveticaOblique)
                .map_err(|e| Error::Pdf(e.to_string()))?,
        };

        let accent = template.accent();
        let body = Color::Rgb(Rgb::new(0.15, 0.15, 0.15, None));
        let muted = Color::Rgb(Rgb::new(0.45, 0.45, 0.45, None));

        let mut cursor = PageCursor::new(&doc, doc.get_page(page).get_layer(layer));

        if let Some(bytes) = logo_png {
            embed_logo(&cursor.layer, bytes)?;
        }

        // ── Header ──
        cursor.text(&full_name, &fonts.bold, template.name_size(), &accent, 0.0);
        if !candidate.current_position.is_empty() {
            cursor.text(
                &candidate.current_position,
                &fonts.italic,
                template.body_size() + 1.0,
                &muted,
                0.0,
            );
        }
        let mut contact_parts: Vec<&str> = Vec::new();
        for part in [
            candidate.email.as_str(),
            candidate.phone.as_str(),
            candidate.location.as_str(),
            candidate.linkedin_url.as_str(),
        ] {
            if !part.is_empty() {
                contact_parts.push(part);
            }
        }
        if !contact_parts.is_empty() {
            cursor.text(
                &contact_parts.join("  |  "),
                &fonts.regular,
                template.body_size() - 1.0,
                &muted,
                0.0,
            );
        }
        if !candidate.birth_date.is_empty() {
            cursor.text(
                &format!("Born {}", candidate.birth_date),
                &fonts.regular,
                template.body_size() - 1.0,
                &muted,
                0.0,
            );
        }
        cursor.advance(2.0);
        cursor.rule(&accent, 1.2);
        cursor.advance(template.section_gap() - 2.0);

        if !candidate.summary.is_empty() {
            Self::section_heading(&mut cursor, "Summary", &fonts, template, &accent);
            cursor.paragraph(&candidate.summary, &fonts.regular, template.body_size(), &body, 0.0);
            cursor.advance(template.section_gap());
        }

        if !candidate.skills.is_empty() {
            Self::section_heading(&mut cursor, "Skills", &fonts, template, &accent);
            cursor.paragraph(
                &candidate.skills.join(", "),
                &fonts.regular,
                template.body_size(),
                &body,
                0.0,
            );
            cursor.advance(template.section_gap());
        }

        let experience = entries_from_text(&candidate.experience);
        if !experience.is_empty() {
            Self::section_heading(&mut cursor, "Experience", &fonts, template, &accent);
            for entry in &experience {
                Self::render_experience_entry(&mut cursor, entry, &fonts, template, &body, &muted);
            }
            cursor.advance(template.section_gap());
        }

        let education = entries_from_text(&candidate.education);
        if !education.is_empty() {
            Self::section_heading(&mut cursor, "Education", &fonts, template, &accent);
            for entry in &education {
                Self::render_education_entry(&mut cursor, entry, &fonts, template, &body, &muted);
            }
            cursor.advance(template.section_gap());
        }

        let languages = entries_from_text(&candidate.languages);
        if !languages.is_empty() {
            Self::section_heading(&mut cursor, "Languages", &fonts, template, &accent);
            let rendered: Vec<String> = languages
                .iter()
                .map(|entry| match entry {
                    JsonValue::String(s) => s.clone(),
                    other => {
                        let name = entry_field(other, &["language", "name"]).unwrap_or("");
                        match entry_field(other, &["level", "proficiency"]) {
                            Some(level) => format!("{} ({})", name, level),
                            None => name.to_string(),
                        }
                    }
                })
                .filter(|s| !s.trim().is_empty())
                .collect();
            cursor.paragraph(
                &rendered.join(", "),
                &fonts.regular,
                template.body_size(),
                &body,
                0.0,
            );
            cursor.advance(template.section_gap());
        }

        let certifications = entries_from_text(&candidate.certifications);
        if !certifications.is_empty() {
            Self::section_heading(&mut cursor, "Certifications", &fonts, template, &accent);
            for entry in &certifications {
                let text = match entry {
                    JsonValue::String(s) => s.clone(),
                    other => {
                        let name = entry_field(other, &["name", "title"]).unwrap_or("");
                        let issuer = entry_field(other, &["issuer", "organization"]);
                        let year = entry_field(other, &["year", "date"]);
                        match (issuer, year) {
                            (Some(i), Some(y)) => format!("{} - {} ({})", name, i, y),
                            (Some(i), None) => format!("{} - {}", name, i),
                            (None, Some(y)) => format!("{} ({})", name, y),
                            (None, None) => name.to_string(),
                        }
                    }
                };
                if !text.trim().is_empty() {
                    cursor.paragraph(
                        &format!("- {}", text),
                        &fonts.regular,
                        template.body_size(),
                        &body,
                        0.0,
                    );
                }
            }
            cursor.advance(template.section_gap());
        }

        if !candidate.hobbies.is_empty() {
            Self::section_heading(&mut cursor, "Interests", &fonts, template, &accent);
            cursor.paragraph(&candidate.hobbies, &fonts.regular, template.body_size(), &body, 0.0);
        }

        doc.save_to_bytes().map_err(|e| Error::Pdf(e.to_string()))
    }

    fn section_heading(
        cursor: &mut PageCursor,
        title: &str,
        fonts: &Fonts,
        template: ResumeTemplate,
        accent: &Color,
    ) {
        cursor.ensure_space(template.heading_size() * MM_PER_PT * 1.45 + 8.0);
        let title = match template {
            ResumeTemplate::Modern => title.to_uppercase(),
            _ => title.to_string(),
        };
        cursor.text(&title, &fonts.bold, template.heading_size(), accent, 0.0);
        if template.rules_under_headings() {
            cursor.rule(accent, 0.6);
        }
        cursor.advance(1.0);
    }

    fn render_experience_entry(
        cursor: &mut PageCursor,
        entry: &JsonValue,
        fonts: &Fonts,
        template: ResumeTemplate,
        body: &Color,
        muted: &Color,
    ) {
        if let JsonValue::String(text) = entry {
            cursor.paragraph(text, &fonts.regular, template.body_size(), body, 0.0);
            cursor.advance(1.5);
            return;
        }

        let title = entry_field(entry, &["title", "position", "role"]).unwrap_or("");
        let company = entry_field(entry, &["company", "employer"]).unwrap_or("");
        let headline = match (title.is_empty(), company.is_empty()) {
            (false, false) => format!("{} - {}", title, company),
            (false, true) => title.to_string(),
            (true, false) => company.to_string(),
            (true, true) => String::new(),
        };
        if !headline.is_empty() {
            cursor.text(&headline, &fonts.bold, template.body_size() + 0.5, body, 0.0);
        }
        if let Some(period) = entry_field(entry, &["period", "years", "duration", "dates"]) {
            cursor.text(period, &fonts.italic, template.body_size() - 1.0, muted, 0.0);
        }
        if let Some(description) = entry_field(entry, &["description", "details"]) {
            cursor.paragraph(description, &fonts.regular, template.body_size(), body, 0.0);
        }
        if let Some(JsonValue::Array(items)) = entry.get("responsibilities") {
            for item in items {
                if let Some(text) = item.as_str() {
                    cursor.paragraph(
                        &format!("- {}", text),
                        &fonts.regular,
                        template.body_size(),
                        body,
                        3.0,
                    );
                }
            }
        }
        cursor.advance(2.0);
    }

    fn render_education_entry(
        cursor: &mut PageCursor,
        entry: &JsonValue,
        fonts: &Fonts,
        template: ResumeTemplate,
        body: &Color,
        muted: &Color,
    ) {
        if let JsonValue::String(text) = entry {
            cursor.paragraph(text, &fonts.regular, template.body_size(), body, 0.0);
            cursor.advance(1.5);
            return;
        }

        let degree = entry_field(entry, &["degree", "title", "field"]).unwrap_or("");
        let school = entry_field(entry, &["school", "institution", "university"]).unwrap_or("");
        let headline = match (degree.is_empty(), school.is_empty()) {
            (false, false) => format!("{} - {}", degree, school),
            (false, true) => degree.to_string(),
            (true, false) => school.to_string(),
            (true, true) => String::new(),
        };
        if !headline.is_empty() {
            cursor.text(&headline, &fonts.bold, template.body_size() + 0.5, body, 0.0);
        }
        if let Some(period) = entry_field(entry, &["period", "years", "year", "dates"]) {
            cursor.text(period, &fonts.italic, template.body_size() - 1.0, muted, 0.0);
        }
        cursor.advance(2.0);
    }

    /// Tabular export of the candidate list, one row per candidate.
    pub fn generate_candidates_xlsx(candidates: &[Candidate]) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Candidates")?;

        let header_bg = XlsxColor::RGB(0x0F172A);
        let border_color = XlsxColor::RGB(0xE2E8F0);
        let alt_row = XlsxColor::RGB(0xF8FAFC);

        let columns = [
            ("#", 6.0),
            ("First name", 16.0),
            ("Last name", 16.0),
            ("Email", 30.0),
            ("Phone", 18.0),
            ("Location", 18.0),
            ("Position", 24.0),
            ("Profile", 20.0),
            ("Skills", 44.0),
            ("Availability", 12.0),
            ("Status", 14.0),
            ("Created", 20.0),
        ];
        for (i, (_, width)) in columns.iter().enumerate() {
            worksheet.set_column_width(i as u16, *width)?;
        }

        let header_format = Format::new()
            .set_bold()
            .set_font_size(10)
            .set_font_color(XlsxColor::White)
            .set_background_color(header_bg)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_border(FormatBorder::Thin)
            .set_border_color(border_color);
        for (i, (title, _)) in columns.iter().enumerate() {
            worksheet.write_string_with_format(0, i as u16, *title, &header_format)?;
        }

        for (row_idx, candidate) in candidates.iter().enumerate() {
            let row = (row_idx + 1) as u32;
            let mut format = Format::new()
                .set_font_size(10)
                .set_border(FormatBorder::Thin)
                .set_border_color(border_color);
            if row_idx % 2 == 0 {
                format = format.set_background_color(alt_row);
            }

            worksheet.write_number_with_format(row, 0, (row_idx + 1) as f64, &format)?;
            worksheet.write_string_with_format(row, 1, &candidate.first_name, &format)?;
            worksheet.write_string_with_format(row, 2, &candidate.last_name, &format)?;
            worksheet.write_string_with_format(row, 3, &candidate.email, &format)?;
            worksheet.write_string_with_format(row, 4, &candidate.phone, &format)?;
            worksheet.write_string_with_format(row, 5, &candidate.location, &format)?;
            worksheet.write_string_with_format(row, 6, &candidate.current_position, &format)?;
            worksheet.write_string_with_format(row, 7, &candidate.profile, &format)?;
            worksheet.write_string_with_format(row, 8, &candidate.skills.join(", "), &format)?;
            worksheet.write_string_with_format(row, 9, &candidate.availability, &format)?;
            worksheet.write_string_with_format(row, 10, &candidate.status, &format)?;
            worksheet.write_string_with_format(
                row,
                11,
                &candidate.created_at.format("%Y-%m-%d %H:%M").to_string(),
                &format,
            )?;
        }

        let buffer = workbook.save_to_buffer()?;
        Ok(buffer)
    }
}

fn embed_logo(layer: &PdfLayerReference, bytes: &[u8]) -> Result<()> {
    use printpdf::image_crate::codecs::png::PngDecoder;
    use printpdf::{Image, ImageTransform};

    let decoder = PngDecoder::new(std::io::Cursor::new(bytes))
        .map_err(|e| Error::Pdf(format!("Invalid logo image: {}", e)))?;
    let image = Image::try_from(decoder).map_err(|e| Error::Pdf(format!("Invalid logo image: {}", e)))?;
    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm((PAGE_WIDTH - MARGIN - 28.0) as f32)),
            translate_y: Some(Mm((PAGE_HEIGHT - MARGIN - 14.0) as f32)),
            scale_x: Some(0.25),
            scale_y: Some(0.25),
            ..Default::default()
        },
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_candidate() -> Candidate {
        Candidate {
            id: Uuid::new_v4(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            email: "jane@example.com".into(),
            phone: "+43 660 1234567".into(),
            location: "Vienna".into(),
            current_position: "QA Engineer".into(),
            profile: "Manual Tester".into(),
            experience: serde_json::json!([
                {
                    "title": "QA Engineer",
                    "company": "Acme",
                    "period": "2021 - 2024",
                    "responsibilities": ["Regression testing", "Release sign-off"]
                }
            ])
            .to_string(),
            education: serde_json::json!([
                { "degree": "BSc Computer Science", "school": "TU Wien", "years": "2016 - 2020" }
            ])
            .to_string(),
            skills: vec!["Rust".into(), "SQL".into(), "Selenium".into()],
            languages: serde_json::json!([
                { "language": "German", "level": "native" },
                { "language": "English", "level": "C1" }
            ])
            .to_string(),
            certifications: serde_json::json!([{ "name": "ISTQB", "year": "2022" }]).to_string(),
            hobbies: "Climbing, chess".into(),
            birth_date: "1995-04-12".into(),
            summary: "Detail-oriented QA engineer with a focus on test automation.".into(),
            availability: "yes".into(),
            linkedin_url: "https://linkedin.com/in/janedoe".into(),
            status: "active".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn renders_pdf_for_every_template() {
        for template in [
            ResumeTemplate::Classic,
            ResumeTemplate::Modern,
            ResumeTemplate::Compact,
        ] {
            let bytes = ExportService::render_resume_pdf(&sample_candidate(), template, None)
                .expect("render");
            assert!(bytes.starts_with(b"%PDF"), "not a PDF for {:?}", template);
        }
    }

    #[test]
    fn renders_free_text_sections() {
        let mut candidate = sample_candidate();
        candidate.experience = "Five years of QA work in two agencies".into();
        candidate.education = String::new();
        candidate.languages = "German, English".into();
        let bytes =
            ExportService::render_resume_pdf(&candidate, ResumeTemplate::Classic, None).expect("render");
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn template_selection_defaults_to_classic() {
        assert_eq!(ResumeTemplate::from_name(None), ResumeTemplate::Classic);
        assert_eq!(ResumeTemplate::from_name(Some("unknown")), ResumeTemplate::Classic);
        assert_eq!(ResumeTemplate::from_name(Some("Modern")), ResumeTemplate::Modern);
        assert_eq!(ResumeTemplate::from_name(Some("compact")), ResumeTemplate::Compact);
    }

    #[test]
    fn entries_tolerate_all_column_shapes() {
        assert!(entries_from_text("").is_empty());
        assert_eq!(entries_from_text("free text").len(), 1);
        assert_eq!(entries_from_text(r#"{"title":"QA"}"#).len(), 1);
        assert_eq!(entries_from_text(r#"[{"title":"QA"},{"title":"Dev"}]"#).len(), 2);
    }

    #[test]
    fn wrap_respects_word_boundaries() {
        let lines = wrap_text("alpha beta gamma delta", 11);
        assert_eq!(lines, vec!["alpha beta", "gamma delta"]);
        let long = wrap_text("supercalifragilistic", 5);
        assert_eq!(long, vec!["supercalifragilistic"]);
    }

    #[test]
    fn xlsx_export_produces_workbook() {
        let bytes = ExportService::generate_candidates_xlsx(&[sample_candidate()]).expect("xlsx");
        // XLSX is a zip container
        assert!(bytes.starts_with(b"PK"));
    }
}

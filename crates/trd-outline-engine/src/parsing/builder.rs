use crate::models::{ContentItem, Section, SectionType, Subsection};

use super::{
    ParseOptions, classify::LineClass, section_type::infer_section_type, table::TableBuffer,
};

/// Title of the section synthesized for pre-header content.
pub const PREAMBLE_TITLE: &str = "Preamble";

/// Builds the section tree from classified lines.
///
/// Holds three latched cursors: the open section, the open subsection and
/// the open table. Each is either empty or accumulating; once closed an
/// entity is never reopened.
pub struct SectionBuilder {
    options: ParseOptions,
    current_section: Option<Section>,
    current_subsection: Option<Subsection>,
    open_table: Option<TableBuffer>,
    section_count: u32,
    next_subsection: u32,
    out: Vec<Section>,
}

impl SectionBuilder {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            current_section: None,
            current_subsection: None,
            open_table: None,
            section_count: 0,
            next_subsection: 1,
            out: vec![],
        }
    }

    pub fn push(&mut self, class: LineClass) {
        if let LineClass::TableRow(row) = &class {
            self.open_table
                .get_or_insert_with(TableBuffer::new)
                .push_row(row);
            return;
        }

        self.flush_table();

        match class {
            LineClass::SectionHeader { title } => self.open_section(title),
            LineClass::SubsectionHeader { title } => self.open_subsection(title),
            LineClass::Content(item) => self.append(item),
            LineClass::TableRow(_) => {}
        }
    }

    pub fn finish(mut self) -> Vec<Section> {
        // EOF flush
        self.flush_table();
        self.close_section();
        self.out
    }

    fn open_section(&mut self, title: String) {
        self.close_section();
        self.section_count += 1;
        self.next_subsection = 1;

        let section_type = infer_section_type(&title);
        self.current_section = Some(Section::new(self.section_count, title, section_type));
    }

    fn open_subsection(&mut self, title: String) {
        // The preamble never owns subsections.
        let Some(section) = self.current_section.as_ref().filter(|_| self.section_count > 0)
        else {
            log::trace!("dropping subsection {title:?} outside any section");
            return;
        };

        let subsection = Subsection::new(section.number, self.next_subsection, title);
        self.next_subsection += 1;
        self.close_subsection();
        self.current_subsection = Some(subsection);
    }

    fn append(&mut self, item: ContentItem) {
        if let Some(subsection) = self.current_subsection.as_mut() {
            subsection.content.push(item);
            return;
        }

        if self.current_section.is_none() && self.wants_preamble() {
            self.current_section = Some(Section::new(0, PREAMBLE_TITLE, SectionType::General));
        }

        match self.current_section.as_mut() {
            Some(section) => section.content.push(item),
            None => log::trace!("dropping {} before the first header", item.kind()),
        }
    }

    /// A preamble is only synthesized before the first real section.
    fn wants_preamble(&self) -> bool {
        self.options.keep_preamble && self.section_count == 0
    }

    fn flush_table(&mut self) {
        if let Some(buffer) = self.open_table.take() {
            self.append(ContentItem::Table(buffer.finish()));
        }
    }

    fn close_subsection(&mut self) {
        if let Some(subsection) = self.current_subsection.take()
            && let Some(section) = self.current_section.as_mut()
        {
            section.subsections.push(subsection);
        }
    }

    fn close_section(&mut self) {
        self.close_subsection();
        if let Some(section) = self.current_section.take() {
            self.out.push(section);
        }
    }
}

impl Default for SectionBuilder {
    fn default() -> Self {
        Self::new(ParseOptions::default())
    }
}

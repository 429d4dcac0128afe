//! Typed views over spreadsheet elements, and nested indexing
//!
//! A view borrows one element of the tree and knows which kind of element its
//! children are:
//!
//! | view                | element             | children |
//! |---------------------|---------------------|----------|
//! | [`SpreadsheetView`] | `office:spreadsheet`| [`Table`]|
//! | [`Table`]           | `table:table`       | [`Row`]  |
//! | [`Row`]             | `table:table-row`   | [`Cell`] |
//! | [`Cell`]            | `table:table-cell`  | -        |
//!
//! Children are found with [`Element::descendants`], so rows inside
//! `table:table-header-rows` or `table:table-row-group` count as rows of the
//! table, in document order. Repeat attributes
//! (`table:number-rows-repeated`, `table:number-columns-repeated`) are not
//! expanded: an index addresses an element.
//!
//! ```rust
//! use odsgrid_core::{Index, OdfView, SpreadsheetDocument};
//!
//! let mut doc = SpreadsheetDocument::new();
//! {
//!     let mut table = doc.add_table("Sheet1");
//!     for r in 0..3 {
//!         let mut row = table.append_row();
//!         for c in 0..3 {
//!             row.append_cell().set_value((r * 3 + c).into());
//!         }
//!     }
//! }
//!
//! let sheet = doc.spreadsheet();
//! let table = sheet.table(0).unwrap();
//! assert_eq!(table.cell("B3").unwrap().text(), "7");
//!
//! // Nested indexing: table "Sheet1", rows 0..2, column "C"
//! let col = sheet
//!     .select(&[Index::from("Sheet1"), Index::from(0isize..2), Index::from(2i32)])
//!     .unwrap();
//! let texts: Vec<_> = col.cells().iter().map(|c| c.text()).collect();
//! assert_eq!(texts, vec!["2", "5"]);
//! ```

use std::fmt;

use crate::address::{CellAddress, CellRange, ColumnSpan};
use crate::dom::{Element, Node};
use crate::error::{Error, Result};
use crate::index::{resolve_position, Index, Slice};
use crate::value::CellValue;

pub const SPREADSHEET_TAG: &str = "office:spreadsheet";
pub const TABLE_TAG: &str = "table:table";
pub const ROW_TAG: &str = "table:table-row";
pub const CELL_TAG: &str = "table:table-cell";
pub const PARAGRAPH_TAG: &str = "text:p";

/// Attributes that carry a cell's typed value
const VALUE_ATTRIBUTES: &[&str] = &[
    "office:value-type",
    "calcext:value-type",
    "office:value",
    "office:date-value",
    "office:time-value",
    "office:boolean-value",
    "office:string-value",
    "office:currency",
];

/// A read-only view over one element of a known kind
pub trait OdfView<'a>: Copy + Sized {
    /// Qualified tag name of the wrapped element
    const TAG: &'static str;
    /// Short name used in error messages
    const KIND: &'static str;

    /// Wrap without checking the tag
    fn wrap(element: &'a Element) -> Self;

    /// The wrapped element
    fn element(&self) -> &'a Element;

    /// Lift into a [`Selection`]
    fn into_selection(self) -> Selection<'a>;

    /// Apply a path of indices starting at this view
    fn select(&self, path: &[Index]) -> Result<Selection<'a>>;

    /// Wrap an element, checking that it has the expected tag
    fn new(element: &'a Element) -> Result<Self> {
        if element.name() != Self::TAG {
            return Err(Error::UnexpectedElement {
                expected: Self::TAG,
                found: element.name().to_string(),
            });
        }
        Ok(Self::wrap(element))
    }
}

/// A view whose children can be addressed by position, slice, or name
pub trait Indexable<'a>: OdfView<'a> {
    type Child: OdfView<'a>;

    /// Translate a textual index into positional indices for this level
    ///
    /// The result is spliced in front of the remaining path, so a table can
    /// turn "B3" into `[2, 1]` (row, then column). It holds only positions
    /// and slices.
    fn expand_name(&self, name: &str) -> Result<Vec<Index>>;

    /// All child views in document order
    fn children(&self) -> Vec<Self::Child> {
        self.element()
            .descendants(Self::Child::TAG)
            .into_iter()
            .map(Self::Child::wrap)
            .collect()
    }

    fn len(&self) -> usize {
        self.element().count_descendants(Self::Child::TAG)
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A single child; negative positions count from the end
    fn get(&self, index: isize) -> Result<Self::Child> {
        let mut children = self.children();
        let pos = resolve_position(index, children.len(), Self::KIND)?;
        Ok(children.swap_remove(pos))
    }

    /// The children picked out by a slice
    fn slice(&self, slice: &Slice) -> Result<Vec<Self::Child>> {
        let children = self.children();
        Ok(slice
            .indices(children.len())?
            .into_iter()
            .map(|i| children[i])
            .collect())
    }

    /// Nested indexing
    ///
    /// The first index applies to this level and the rest to the selected
    /// child. A slice followed by more indices yields one nested selection per
    /// sliced child. An empty path selects this view itself.
    fn select_path(&self, path: &[Index]) -> Result<Selection<'a>> {
        let Some((first, rest)) = path.split_first() else {
            return Ok(self.into_selection());
        };

        match first {
            Index::Position(i) => self.get(*i)?.select(rest),
            Index::Slice(s) => self
                .slice(s)?
                .into_iter()
                .map(|child| child.select(rest))
                .collect::<Result<Vec<_>>>()
                .map(Selection::Many),
            Index::Name(name) => {
                let mut expanded = self.expand_name(name)?;
                expanded.extend_from_slice(rest);
                self.select_path(&expanded)
            }
        }
    }
}

/// The result of nested indexing
#[derive(Debug, Clone)]
pub enum Selection<'a> {
    Spreadsheet(SpreadsheetView<'a>),
    Table(Table<'a>),
    Row(Row<'a>),
    Cell(Cell<'a>),
    Many(Vec<Selection<'a>>),
}

impl<'a> Selection<'a> {
    pub fn as_table(&self) -> Option<Table<'a>> {
        match self {
            Selection::Table(t) => Some(*t),
            _ => None,
        }
    }

    pub fn as_row(&self) -> Option<Row<'a>> {
        match self {
            Selection::Row(r) => Some(*r),
            _ => None,
        }
    }

    pub fn as_cell(&self) -> Option<Cell<'a>> {
        match self {
            Selection::Cell(c) => Some(*c),
            _ => None,
        }
    }

    pub fn into_many(self) -> Option<Vec<Selection<'a>>> {
        match self {
            Selection::Many(v) => Some(v),
            _ => None,
        }
    }

    /// Every cell reachable from this selection, depth-first
    pub fn cells(&self) -> Vec<Cell<'a>> {
        let mut out = Vec::new();
        self.collect_cells(&mut out);
        out
    }

    fn collect_cells(&self, out: &mut Vec<Cell<'a>>) {
        match self {
            Selection::Spreadsheet(s) => {
                for table in s.children() {
                    Selection::Table(table).collect_cells(out);
                }
            }
            Selection::Table(t) => {
                for row in t.children() {
                    out.extend(row.children());
                }
            }
            Selection::Row(r) => out.extend(r.children()),
            Selection::Cell(c) => out.push(*c),
            Selection::Many(v) => {
                for s in v {
                    s.collect_cells(out);
                }
            }
        }
    }
}

/// The `office:spreadsheet` body: an indexable list of tables
#[derive(Debug, Clone, Copy)]
pub struct SpreadsheetView<'a> {
    element: &'a Element,
}

impl<'a> OdfView<'a> for SpreadsheetView<'a> {
    const TAG: &'static str = SPREADSHEET_TAG;
    const KIND: &'static str = "spreadsheet";

    fn wrap(element: &'a Element) -> Self {
        Self { element }
    }

    fn element(&self) -> &'a Element {
        self.element
    }

    fn into_selection(self) -> Selection<'a> {
        Selection::Spreadsheet(self)
    }

    fn select(&self, path: &[Index]) -> Result<Selection<'a>> {
        self.select_path(path)
    }
}

impl<'a> Indexable<'a> for SpreadsheetView<'a> {
    type Child = Table<'a>;

    /// A name addresses the table with that `table:name`
    fn expand_name(&self, name: &str) -> Result<Vec<Index>> {
        self.children()
            .iter()
            .position(|t| t.name() == Some(name))
            .map(|pos| vec![Index::Position(pos as isize)])
            .ok_or_else(|| Error::TableNotFound(name.to_string()))
    }
}

impl<'a> SpreadsheetView<'a> {
    pub fn tables(&self) -> Vec<Table<'a>> {
        self.children()
    }

    pub fn table(&self, index: isize) -> Result<Table<'a>> {
        self.get(index)
    }

    pub fn table_by_name(&self, name: &str) -> Result<Table<'a>> {
        self.children()
            .into_iter()
            .find(|t| t.name() == Some(name))
            .ok_or_else(|| Error::TableNotFound(name.to_string()))
    }
}

/// A `table:table` element: an indexable list of rows
#[derive(Debug, Clone, Copy)]
pub struct Table<'a> {
    element: &'a Element,
}

impl<'a> OdfView<'a> for Table<'a> {
    const TAG: &'static str = TABLE_TAG;
    const KIND: &'static str = "table";

    fn wrap(element: &'a Element) -> Self {
        Self { element }
    }

    fn element(&self) -> &'a Element {
        self.element
    }

    fn into_selection(self) -> Selection<'a> {
        Selection::Table(self)
    }

    fn select(&self, path: &[Index]) -> Result<Selection<'a>> {
        self.select_path(path)
    }
}

impl<'a> Indexable<'a> for Table<'a> {
    type Child = Row<'a>;

    /// "B3" becomes `[row 2, column 1]`; "A1:C5" becomes
    /// `[rows 0..5, columns 0..3]`
    fn expand_name(&self, name: &str) -> Result<Vec<Index>> {
        if name.contains(':') {
            let range = CellRange::parse(name)?;
            return Ok(range_indices(&range));
        }
        let addr = CellAddress::parse(name)?;
        Ok(vec![
            Index::Position(addr.row as isize),
            Index::Position(addr.col as isize),
        ])
    }
}

fn range_indices(range: &CellRange) -> Vec<Index> {
    vec![
        Index::Slice(Slice::range(
            range.start.row as usize,
            range.end.row as usize + 1,
        )),
        Index::Slice(Slice::range(
            range.start.col as usize,
            range.end.col as usize + 1,
        )),
    ]
}

impl<'a> Table<'a> {
    /// The `table:name` attribute
    pub fn name(&self) -> Option<&'a str> {
        self.element.attribute("table:name")
    }

    pub fn rows(&self) -> Vec<Row<'a>> {
        self.children()
    }

    pub fn row(&self, index: isize) -> Result<Row<'a>> {
        self.get(index)
    }

    /// The cell at an A1-style address
    pub fn cell(&self, address: &str) -> Result<Cell<'a>> {
        let addr = CellAddress::parse(address)?;
        self.cell_at(addr.row, addr.col)
    }

    /// The cell at 0-based row and column positions
    pub fn cell_at(&self, row: u32, col: u16) -> Result<Cell<'a>> {
        self.row(row as isize)?.cell(col as isize)
    }

    /// The cells of an A1:C5 range, one `Vec` per row
    ///
    /// Like slicing, a range that runs past the last row or cell is clamped
    /// to what exists.
    pub fn range(&self, range: &str) -> Result<Vec<Vec<Cell<'a>>>> {
        let range = CellRange::parse(range)?;
        let path = range_indices(&range);
        let rows = self
            .select_path(&path)?
            .into_many()
            .unwrap_or_default();
        Ok(rows.iter().map(Selection::cells).collect())
    }
}

impl fmt::Display for Table<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Table: {}>", self.name().unwrap_or_default())
    }
}

/// A `table:table-row` element: an indexable list of cells
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    element: &'a Element,
}

impl<'a> OdfView<'a> for Row<'a> {
    const TAG: &'static str = ROW_TAG;
    const KIND: &'static str = "row";

    fn wrap(element: &'a Element) -> Self {
        Self { element }
    }

    fn element(&self) -> &'a Element {
        self.element
    }

    fn into_selection(self) -> Selection<'a> {
        Selection::Row(self)
    }

    fn select(&self, path: &[Index]) -> Result<Selection<'a>> {
        self.select_path(path)
    }
}

impl<'a> Indexable<'a> for Row<'a> {
    type Child = Cell<'a>;

    /// Column letters: "B" becomes position 1, "B:D" the slice 1..4
    fn expand_name(&self, name: &str) -> Result<Vec<Index>> {
        let span = ColumnSpan::parse(name)?;
        if name.contains(':') {
            Ok(vec![Index::Slice(Slice::range(
                span.start as usize,
                span.end as usize + 1,
            ))])
        } else {
            Ok(vec![Index::Position(span.start as isize)])
        }
    }
}

impl<'a> Row<'a> {
    pub fn cells(&self) -> Vec<Cell<'a>> {
        self.children()
    }

    pub fn cell(&self, index: isize) -> Result<Cell<'a>> {
        self.get(index)
    }

    /// The cell in a lettered column ("A", "B", ..., "AA")
    pub fn cell_by_column(&self, letters: &str) -> Result<Cell<'a>> {
        let col = CellAddress::letters_to_column(letters.trim())?;
        self.get(col as isize)
    }

    /// `table:number-rows-repeated`, 1 when absent
    pub fn repeated(&self) -> u32 {
        repeat_count(self.element, ROW_REPEAT)
    }
}

/// A `table:table-cell` element
#[derive(Debug, Clone, Copy)]
pub struct Cell<'a> {
    element: &'a Element,
}

impl<'a> OdfView<'a> for Cell<'a> {
    const TAG: &'static str = CELL_TAG;
    const KIND: &'static str = "cell";

    fn wrap(element: &'a Element) -> Self {
        Self { element }
    }

    fn element(&self) -> &'a Element {
        self.element
    }

    fn into_selection(self) -> Selection<'a> {
        Selection::Cell(self)
    }

    fn select(&self, path: &[Index]) -> Result<Selection<'a>> {
        if path.is_empty() {
            Ok(Selection::Cell(*self))
        } else {
            Err(Error::TooManyIndices(Self::KIND))
        }
    }
}

impl<'a> Cell<'a> {
    /// The `office:value-type` token, if any
    pub fn value_type(&self) -> Option<&'a str> {
        self.element.attribute("office:value-type")
    }

    /// Display text: the cell's paragraphs joined by newlines
    pub fn text(&self) -> String {
        self.element
            .child_elements()
            .filter(|e| e.name() == PARAGRAPH_TAG)
            .map(paragraph_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The typed value
    pub fn value(&self) -> CellValue {
        let has_text = self
            .element
            .child_elements()
            .any(|e| e.name() == PARAGRAPH_TAG);
        let text = has_text.then(|| self.text());
        CellValue::from_attributes(|k| self.element.attribute(k), text)
    }

    /// The `table:formula` attribute (e.g. `of:=SUM([.A1:.A3])`)
    pub fn formula(&self) -> Option<&'a str> {
        self.element.attribute("table:formula")
    }

    /// `table:number-columns-repeated`, 1 when absent
    pub fn repeated(&self) -> u32 {
        repeat_count(self.element, COLUMN_REPEAT)
    }
}

impl fmt::Display for Cell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

const ROW_REPEAT: &str = "table:number-rows-repeated";
const COLUMN_REPEAT: &str = "table:number-columns-repeated";

fn repeat_count(element: &Element, key: &str) -> u32 {
    element
        .attribute(key)
        .and_then(|v| v.parse().ok())
        .filter(|n| *n > 0)
        .unwrap_or(1)
}

/// Text of a `text:p`, expanding `text:s`, `text:tab` and `text:line-break`
fn paragraph_text(p: &Element) -> String {
    let mut out = String::new();
    append_inline_text(p, &mut out);
    out
}

fn append_inline_text(element: &Element, out: &mut String) {
    for child in element.children() {
        match child {
            Node::Text(t) => out.push_str(t),
            Node::Element(e) => match e.name() {
                "text:s" => {
                    let n = e
                        .attribute("text:c")
                        .and_then(|c| c.parse::<usize>().ok())
                        .unwrap_or(1);
                    out.extend(std::iter::repeat(' ').take(n));
                }
                "text:tab" => out.push('\t'),
                "text:line-break" => out.push('\n'),
                _ => append_inline_text(e, out),
            },
        }
    }
}

/// Mutable access to a `table:table` element
pub struct TableMut<'a> {
    element: &'a mut Element,
}

impl<'a> TableMut<'a> {
    pub fn new(element: &'a mut Element) -> Result<Self> {
        check_tag(element, TABLE_TAG)?;
        Ok(Self { element })
    }

    pub fn view(&self) -> Table<'_> {
        Table::wrap(self.element)
    }

    pub fn name(&self) -> Option<&str> {
        self.element.attribute("table:name")
    }

    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.element.set_attribute("table:name", name);
    }

    pub fn row_count(&self) -> usize {
        self.element.count_descendants(ROW_TAG)
    }

    /// Append an empty row after the table's existing content
    pub fn append_row(&mut self) -> RowMut<'_> {
        RowMut {
            element: self.element.push_element_mut(Element::new(ROW_TAG)),
        }
    }

    /// Mutable access to one row
    ///
    /// A row element repeated with `table:number-rows-repeated` is split
    /// first, so the returned row stands for a single logical row and the
    /// remaining repetitions follow it as their own element.
    pub fn row_mut(&mut self, index: isize) -> Result<RowMut<'_>> {
        let element = nth_single_mut(self.element, ROW_TAG, index, "table", ROW_REPEAT)?;
        Ok(RowMut { element })
    }

    /// The cell at an A1-style address
    pub fn cell_mut(&mut self, address: &str) -> Result<CellMut<'_>> {
        let addr = CellAddress::parse(address)?;
        self.row_mut(addr.row as isize)?
            .into_cell_mut(addr.col as isize)
    }
}

/// Mutable access to a `table:table-row` element
pub struct RowMut<'a> {
    element: &'a mut Element,
}

impl<'a> RowMut<'a> {
    pub fn new(element: &'a mut Element) -> Result<Self> {
        check_tag(element, ROW_TAG)?;
        Ok(Self { element })
    }

    pub fn view(&self) -> Row<'_> {
        Row::wrap(self.element)
    }

    pub fn cell_count(&self) -> usize {
        self.element.count_descendants(CELL_TAG)
    }

    pub fn append_cell(&mut self) -> CellMut<'_> {
        CellMut {
            element: self.element.push_element_mut(Element::new(CELL_TAG)),
        }
    }

    /// Mutable access to one cell, splitting a
    /// `table:number-columns-repeated` run like [`TableMut::row_mut`] does
    pub fn cell_mut(&mut self, index: isize) -> Result<CellMut<'_>> {
        RowMut {
            element: &mut *self.element,
        }
        .into_cell_mut(index)
    }

    pub fn into_cell_mut(self, index: isize) -> Result<CellMut<'a>> {
        let element = nth_single_mut(self.element, CELL_TAG, index, "row", COLUMN_REPEAT)?;
        Ok(CellMut { element })
    }
}

/// Mutable access to a `table:table-cell` element
pub struct CellMut<'a> {
    element: &'a mut Element,
}

impl<'a> CellMut<'a> {
    pub fn new(element: &'a mut Element) -> Result<Self> {
        check_tag(element, CELL_TAG)?;
        Ok(Self { element })
    }

    pub fn view(&self) -> Cell<'_> {
        Cell::wrap(self.element)
    }

    pub fn value(&self) -> CellValue {
        self.view().value()
    }

    /// Replace the value and the display paragraph
    ///
    /// A formula on the cell is dropped, since its cached result would no
    /// longer match.
    pub fn set_value(&mut self, value: CellValue) {
        self.clear();
        if value.is_empty() {
            return;
        }
        for (key, v) in value.to_attributes() {
            self.element.set_attribute(key, v);
        }
        self.element
            .push_element(Element::new(PARAGRAPH_TAG).with_text(value.to_string()));
    }

    /// Remove the value, formula and paragraphs; other attributes such as the
    /// style and repeat count are kept
    pub fn clear(&mut self) {
        for key in VALUE_ATTRIBUTES {
            self.element.remove_attribute(key);
        }
        self.element.remove_attribute("table:formula");
        self.element.remove_children(PARAGRAPH_TAG);
    }
}

fn check_tag(element: &Element, expected: &'static str) -> Result<()> {
    if element.name() != expected {
        return Err(Error::UnexpectedElement {
            expected,
            found: element.name().to_string(),
        });
    }
    Ok(())
}

/// Resolve a possibly negative position among `tag` descendants, mutably,
/// detaching the element's first repetition from the rest of its run
fn nth_single_mut<'e>(
    element: &'e mut Element,
    tag: &str,
    index: isize,
    kind: &'static str,
    repeat_key: &str,
) -> Result<&'e mut Element> {
    let len = element.count_descendants(tag);
    let pos = resolve_position(index, len, kind)?;
    let missing = Error::IndexOutOfRange {
        index,
        len,
        element: kind,
    };

    let path = element
        .nth_descendant_path(tag, pos)
        .ok_or_else(|| missing.clone())?;
    if let Some((&last, parent_path)) = path.split_last() {
        if let Some(parent) = element.element_at_path_mut(parent_path) {
            split_first_repeat(parent, last, repeat_key);
        }
    }
    element.element_at_path_mut(&path).ok_or(missing)
}

/// Turn a run of `n` repeated elements into one element followed by a run
/// of `n - 1`
fn split_first_repeat(parent: &mut Element, child: usize, repeat_key: &str) {
    let Some(target) = parent.child_element_mut(child) else {
        return;
    };
    let count = repeat_count(target, repeat_key);
    if count <= 1 {
        return;
    }

    let mut rest = target.clone();
    if count == 2 {
        rest.remove_attribute(repeat_key);
    } else {
        rest.set_attribute(repeat_key, (count - 1).to_string());
    }
    target.remove_attribute(repeat_key);
    parent.insert_element(child + 1, rest);
}

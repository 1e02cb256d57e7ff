//! Two-pass MPS reader.
//!
//! The first pass classifies rows and collects column names so that every
//! dense array can be allocated at its final size. The second pass fills in
//! coefficients, right-hand sides, ranges and bounds.
//!
//! A line is a section header when its trimmed text is a section keyword
//! (`NAME` and `OBJSENSE` may carry one argument), whatever its indentation.
//! Every other line is data. Blank lines and lines starting with `*` are
//! skipped.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::bounds::BoundType;
use super::error::{MpsError, MpsErrorKind};
use crate::error::Result;
use crate::expr::VarKind;
use crate::model::{Bound, Constraint, LinearProgram, Objective, Relation, Sense};

type MpsResult<T> = std::result::Result<T, MpsError>;

/// A RANGES entry, kept as read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeEntry {
    /// Index into the constraint rows.
    pub row: usize,
    pub value: f64,
}

/// Tokens of an MPS file laid out as dense arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct MpsModel {
    /// Problem name from the NAME line; may be empty.
    pub name: String,
    pub sense: Sense,
    pub objective_name: String,
    /// Column names in order of first appearance.
    pub variables: Vec<String>,
    pub variable_kinds: Vec<VarKind>,
    pub objective: Vec<f64>,
    /// Constant term, the negated RHS of the objective row.
    pub objective_offset: f64,
    pub row_names: Vec<String>,
    pub relations: Vec<Relation>,
    pub rows: Vec<Vec<f64>>,
    pub rhs: Vec<f64>,
    pub ranges: Vec<RangeEntry>,
    /// Present only when the file has a BOUNDS section.
    pub bounds: Option<Vec<(f64, f64)>>,
    /// Last bound type applied to each column.
    pub bound_types: Option<Vec<Option<BoundType>>>,
}

impl MpsModel {
    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.rows.len()
    }

    /// Validate and assemble the canonical program.
    pub fn into_linear_program(self) -> Result<LinearProgram> {
        let objective =
            Objective::new(self.objective, self.sense).with_constant(self.objective_offset);
        let constraints = self
            .rows
            .into_iter()
            .zip(self.relations)
            .zip(self.rhs)
            .map(|((coefficients, relation), rhs)| Constraint::new(coefficients, relation, rhs))
            .collect();
        let bounds = self
            .bounds
            .map(|b| b.into_iter().map(Bound::from).collect());

        let mut lp = LinearProgram::new(objective, constraints, bounds)?
            .with_variable_names(self.variables)?;
        if !self.name.is_empty() {
            lp = lp.with_name(self.name);
        }
        if self.variable_kinds.iter().any(|k| k.is_discrete()) {
            lp = lp.with_variable_kinds(self.variable_kinds)?;
        }
        Ok(lp)
    }
}

/// Parse MPS text from a reader. The input is read fully before parsing.
pub fn parse<R: BufRead>(reader: R) -> Result<MpsModel> {
    let lines = reader.lines().collect::<std::io::Result<Vec<_>>>()?;
    parse_lines(&lines)
}

/// Parse MPS text held in memory.
pub fn parse_str(text: &str) -> Result<MpsModel> {
    let lines: Vec<&str> = text.lines().collect();
    parse_lines(&lines)
}

/// Read and parse an MPS file.
pub fn read_mps(path: impl AsRef<Path>) -> Result<MpsModel> {
    let path = path.as_ref();
    let file = File::open(path)?;
    tracing::debug!(
        component = "mps",
        operation = "open",
        path = %path.display(),
        "Reading MPS file"
    );
    parse(BufReader::new(file))
}

fn parse_lines<S: AsRef<str>>(raw: &[S]) -> Result<MpsModel> {
    let lines: Vec<SourceLine<'_>> = raw
        .iter()
        .enumerate()
        .map(|(i, text)| SourceLine {
            no: i + 1,
            text: text.as_ref(),
        })
        .collect();

    let mut collector = Collector::default();
    walk(&lines, &mut collector)?;
    let mut filler = collector.finish(lines.len())?;
    tracing::debug!(
        component = "mps",
        operation = "collect",
        status = "ok",
        rows = filler.model.num_constraints(),
        columns = filler.model.num_variables(),
        free_rows = filler.free_rows.len(),
        "First pass complete"
    );

    walk(&lines, &mut filler)?;
    tracing::debug!(
        component = "mps",
        operation = "fill",
        status = "ok",
        ranges = filler.model.ranges.len(),
        bounded = filler.model.bounds.is_some(),
        "Second pass complete"
    );
    Ok(filler.model)
}

struct SourceLine<'a> {
    no: usize,
    text: &'a str,
}

impl SourceLine<'_> {
    fn error(&self, kind: MpsErrorKind) -> MpsError {
        MpsError::new(self.no, self.text, kind)
    }

    fn number(&self, field: &str) -> MpsResult<f64> {
        field
            .parse::<f64>()
            .map_err(|_| self.error(MpsErrorKind::InvalidNumber(field.to_string())))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Name,
    ObjSense,
    Rows,
    Columns,
    Rhs,
    Ranges,
    Bounds,
}

enum Line<'a> {
    Skip,
    End,
    Header(Section, &'a str),
    Data(Vec<&'a str>),
}

fn classify<'a>(line: &SourceLine<'a>, current: Option<Section>) -> MpsResult<Line<'a>> {
    let text = line.text.trim_end();
    let trimmed = text.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('*') {
        return Ok(Line::Skip);
    }
    let indented = text.len() != trimmed.len();
    let fields: Vec<&str> = trimmed.split_whitespace().collect();
    let rest = match trimmed.split_once(char::is_whitespace) {
        Some((_, r)) => r.trim(),
        None => "",
    };

    let header = match (fields[0], fields.len()) {
        ("ENDATA", 1) => return Ok(Line::End),
        ("ROWS", 1) => Some(Section::Rows),
        ("COLUMNS", 1) => Some(Section::Columns),
        ("RHS", 1) => Some(Section::Rhs),
        ("RANGES", 1) => Some(Section::Ranges),
        ("BOUNDS", 1) => Some(Section::Bounds),
        ("OBJSENSE", 1 | 2) => Some(Section::ObjSense),
        ("NAME", n) if !indented || n <= 2 => Some(Section::Name),
        _ => None,
    };
    if let Some(section) = header {
        return Ok(Line::Header(section, rest));
    }

    // A lone unindented word is a misspelt header, except for the sense line.
    if !indented && fields.len() == 1 && current != Some(Section::ObjSense) {
        return Err(line.error(MpsErrorKind::UnknownSection(fields[0].to_string())));
    }
    Ok(Line::Data(fields))
}

trait Pass {
    fn header(&mut self, _section: Section, _line: &SourceLine<'_>, _rest: &str) -> MpsResult<()> {
        Ok(())
    }

    fn data(&mut self, section: Section, line: &SourceLine<'_>, fields: &[&str]) -> MpsResult<()>;
}

fn walk(lines: &[SourceLine<'_>], pass: &mut impl Pass) -> MpsResult<()> {
    let mut section = None;
    for line in lines {
        match classify(line, section)? {
            Line::Skip => {}
            Line::End => break,
            Line::Header(s, rest) => {
                section = Some(s);
                pass.header(s, line, rest)?;
            }
            Line::Data(fields) => match section {
                None | Some(Section::Name) => {
                    return Err(line.error(MpsErrorKind::DataOutsideSection))
                }
                Some(s) => pass.data(s, line, &fields)?,
            },
        }
    }
    Ok(())
}

fn is_marker(fields: &[&str]) -> bool {
    fields.get(1) == Some(&"'MARKER'")
}

/// First pass: row classification and column discovery.
#[derive(Default)]
struct Collector {
    name: String,
    sense: Sense,
    objective: Option<String>,
    free_rows: HashSet<String>,
    row_names: Vec<String>,
    relations: Vec<Relation>,
    row_index: HashMap<String, usize>,
    variables: Vec<String>,
    kinds: Vec<VarKind>,
    column_index: HashMap<String, usize>,
    integer_block: bool,
    has_bounds: bool,
}

impl Collector {
    fn set_sense(&mut self, line: &SourceLine<'_>, word: &str) -> MpsResult<()> {
        self.sense = word
            .parse()
            .map_err(|_| line.error(MpsErrorKind::InvalidSense(word.to_string())))?;
        Ok(())
    }

    fn add_row(&mut self, line: &SourceLine<'_>, ty: &str, name: &str) -> MpsResult<()> {
        let taken = self.row_index.contains_key(name)
            || self.free_rows.contains(name)
            || self.objective.as_deref() == Some(name);
        if taken {
            return Err(line.error(MpsErrorKind::DuplicateRow(name.to_string())));
        }

        let relation = match ty {
            "N" if self.objective.is_none() => {
                self.objective = Some(name.to_string());
                return Ok(());
            }
            "N" => {
                tracing::warn!(
                    component = "mps",
                    operation = "rows",
                    row = name,
                    line = line.no,
                    "Ignoring extra free row"
                );
                self.free_rows.insert(name.to_string());
                return Ok(());
            }
            "E" => Relation::Eq,
            "G" => Relation::Ge,
            "L" => Relation::Le,
            other => return Err(line.error(MpsErrorKind::UnknownRowType(other.to_string()))),
        };
        self.row_index.insert(name.to_string(), self.row_names.len());
        self.row_names.push(name.to_string());
        self.relations.push(relation);
        Ok(())
    }

    fn add_column(&mut self, name: &str) {
        if self.column_index.contains_key(name) {
            return;
        }
        self.column_index.insert(name.to_string(), self.variables.len());
        self.variables.push(name.to_string());
        self.kinds.push(if self.integer_block {
            VarKind::Integer
        } else {
            VarKind::Real
        });
    }

    /// Allocate the dense arrays; `end` is the line count used for a missing objective.
    fn finish(self, end: usize) -> MpsResult<Filler> {
        let objective_name = self
            .objective
            .ok_or_else(|| MpsError::new(end, "", MpsErrorKind::MissingObjective))?;
        let n = self.variables.len();
        let m = self.row_names.len();
        let model = MpsModel {
            name: self.name,
            sense: self.sense,
            objective_name,
            variables: self.variables,
            variable_kinds: self.kinds,
            objective: vec![0.0; n],
            objective_offset: 0.0,
            row_names: self.row_names,
            relations: self.relations,
            rows: vec![vec![0.0; n]; m],
            rhs: vec![0.0; m],
            ranges: Vec::new(),
            bounds: self.has_bounds.then(|| vec![(0.0, f64::INFINITY); n]),
            bound_types: self.has_bounds.then(|| vec![None; n]),
        };
        Ok(Filler {
            model,
            free_rows: self.free_rows,
            row_index: self.row_index,
            column_index: self.column_index,
        })
    }
}

impl Pass for Collector {
    fn header(&mut self, section: Section, line: &SourceLine<'_>, rest: &str) -> MpsResult<()> {
        match section {
            Section::Name => self.name = rest.to_string(),
            Section::ObjSense if !rest.is_empty() => self.set_sense(line, rest)?,
            Section::Bounds => self.has_bounds = true,
            _ => {}
        }
        Ok(())
    }

    fn data(&mut self, section: Section, line: &SourceLine<'_>, fields: &[&str]) -> MpsResult<()> {
        match section {
            Section::ObjSense => match fields {
                [word] => self.set_sense(line, word),
                _ => Err(line.error(MpsErrorKind::MalformedLine("OBJSENSE"))),
            },
            Section::Rows => match fields {
                [ty, name] => self.add_row(line, ty, name),
                _ => Err(line.error(MpsErrorKind::MalformedLine("ROWS"))),
            },
            Section::Columns if is_marker(fields) => {
                match fields {
                    [_, _, "'INTORG'"] => self.integer_block = true,
                    [_, _, "'INTEND'"] => self.integer_block = false,
                    _ => return Err(line.error(MpsErrorKind::MalformedLine("MARKER"))),
                }
                Ok(())
            }
            Section::Columns => match fields.len() {
                3 | 5 => {
                    self.add_column(fields[0]);
                    Ok(())
                }
                _ => Err(line.error(MpsErrorKind::MalformedLine("COLUMNS"))),
            },
            _ => Ok(()),
        }
    }
}

enum RowRef {
    Objective,
    Free,
    Constraint(usize),
}

/// Second pass: fills the arrays allocated by [`Collector::finish`].
struct Filler {
    model: MpsModel,
    free_rows: HashSet<String>,
    row_index: HashMap<String, usize>,
    column_index: HashMap<String, usize>,
}

impl Filler {
    fn row(&self, line: &SourceLine<'_>, name: &str) -> MpsResult<RowRef> {
        if name == self.model.objective_name {
            Ok(RowRef::Objective)
        } else if self.free_rows.contains(name) {
            Ok(RowRef::Free)
        } else {
            self.row_index
                .get(name)
                .map(|&i| RowRef::Constraint(i))
                .ok_or_else(|| line.error(MpsErrorKind::UnknownRow(name.to_string())))
        }
    }

    fn column(&self, line: &SourceLine<'_>, name: &str) -> MpsResult<usize> {
        self.column_index
            .get(name)
            .copied()
            .ok_or_else(|| line.error(MpsErrorKind::UnknownColumn(name.to_string())))
    }

    /// Resolve `row value [row value]` pairs.
    fn pairs(
        &self,
        line: &SourceLine<'_>,
        fields: &[&str],
        section: &'static str,
    ) -> MpsResult<Vec<(RowRef, f64)>> {
        if fields.is_empty() || fields.len() > 4 || fields.len() % 2 != 0 {
            return Err(line.error(MpsErrorKind::MalformedLine(section)));
        }
        fields
            .chunks(2)
            .map(|pair| -> MpsResult<(RowRef, f64)> {
                Ok((self.row(line, pair[0])?, line.number(pair[1])?))
            })
            .collect()
    }

    /// RHS and RANGES lines may omit the vector label.
    fn labelled_pairs(
        &self,
        line: &SourceLine<'_>,
        fields: &[&str],
        section: &'static str,
    ) -> MpsResult<Vec<(RowRef, f64)>> {
        let values = if fields.len() % 2 == 1 {
            &fields[1..]
        } else {
            fields
        };
        self.pairs(line, values, section)
    }

    fn columns(&mut self, line: &SourceLine<'_>, fields: &[&str]) -> MpsResult<()> {
        if is_marker(fields) {
            return Ok(());
        }
        let (name, rest) = fields
            .split_first()
            .ok_or_else(|| line.error(MpsErrorKind::MalformedLine("COLUMNS")))?;
        let col = self.column(line, name)?;
        for (row, value) in self.pairs(line, rest, "COLUMNS")? {
            match row {
                RowRef::Objective => self.model.objective[col] = value,
                RowRef::Free => {}
                RowRef::Constraint(i) => self.model.rows[i][col] = value,
            }
        }
        Ok(())
    }

    fn rhs(&mut self, line: &SourceLine<'_>, fields: &[&str]) -> MpsResult<()> {
        for (row, value) in self.labelled_pairs(line, fields, "RHS")? {
            match row {
                RowRef::Objective => self.model.objective_offset = -value,
                RowRef::Free => {}
                RowRef::Constraint(i) => self.model.rhs[i] = value,
            }
        }
        Ok(())
    }

    fn ranges(&mut self, line: &SourceLine<'_>, fields: &[&str]) -> MpsResult<()> {
        for (row, value) in self.labelled_pairs(line, fields, "RANGES")? {
            if let RowRef::Constraint(row) = row {
                self.model.ranges.push(RangeEntry { row, value });
            }
        }
        Ok(())
    }

    fn bound(&mut self, line: &SourceLine<'_>, fields: &[&str]) -> MpsResult<()> {
        let (ty, column, value) = match fields {
            [ty, _label, column] => (*ty, *column, None),
            [ty, _label, column, value] => (*ty, *column, Some(line.number(value)?)),
            _ => return Err(line.error(MpsErrorKind::MalformedLine("BOUNDS"))),
        };
        let ty = BoundType::parse(ty)
            .ok_or_else(|| line.error(MpsErrorKind::UnknownBoundType(ty.to_string())))?;
        if ty.needs_value() && value.is_none() {
            return Err(line.error(MpsErrorKind::MalformedLine("BOUNDS")));
        }
        let col = self.column(line, column)?;

        if let Some(bounds) = self.model.bounds.as_mut() {
            let before = bounds[col];
            ty.apply(value, &mut bounds[col], &mut self.model.variable_kinds[col]);
            if ty == BoundType::Up && before.0 == 0.0 && bounds[col].0 == f64::NEG_INFINITY {
                tracing::warn!(
                    component = "mps",
                    operation = "bounds",
                    column = column,
                    line = line.no,
                    "Negative UP bound on a variable with zero lower bound; lower bound set to -inf"
                );
            }
        }
        if let Some(types) = self.model.bound_types.as_mut() {
            types[col] = Some(ty);
        }
        Ok(())
    }
}

impl Pass for Filler {
    fn data(&mut self, section: Section, line: &SourceLine<'_>, fields: &[&str]) -> MpsResult<()> {
        match section {
            Section::Columns => self.columns(line, fields),
            Section::Rhs => self.rhs(line, fields),
            Section::Ranges => self.ranges(line, fields),
            Section::Bounds => self.bound(line, fields),
            Section::Name | Section::ObjSense | Section::Rows => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LpError;

    const SMALL: &str = "\
NAME          TESTLP
ROWS
 N  COST
 L  LIM1
COLUMNS
    X1        COST         1.0   LIM1         1.0
    X2        COST         2.0   LIM1         1.0
RHS
    RHS       LIM1        10.0
ENDATA
";

    fn mps_error(text: &str) -> MpsError {
        match parse_str(text) {
            Err(LpError::Mps(e)) => e,
            other => panic!("expected MPS error, got {other:?}"),
        }
    }

    #[test]
    fn test_small_model() {
        let model = parse_str(SMALL).unwrap();
        assert_eq!(model.name, "TESTLP");
        assert_eq!(model.objective_name, "COST");
        assert_eq!(model.variables, vec!["X1", "X2"]);
        assert_eq!(model.objective, vec![1.0, 2.0]);
        assert_eq!(model.rows, vec![vec![1.0, 1.0]]);
        assert_eq!(model.relations, vec![Relation::Le]);
        assert_eq!(model.rhs, vec![10.0]);
        assert!(model.bounds.is_none());
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let text = format!("* leading comment\n\n{SMALL}");
        let model = parse_str(&text).unwrap();
        assert_eq!(model.objective, vec![1.0, 2.0]);
    }

    #[test]
    fn test_unknown_row_reports_line() {
        let text = SMALL.replace("LIM1         1.0\n    X2", "LIMX         1.0\n    X2");
        let err = mps_error(&text);
        assert_eq!(err.line, 6);
        assert_eq!(err.kind, MpsErrorKind::UnknownRow("LIMX".into()));
        assert!(err.text.contains("LIMX"));
    }

    #[test]
    fn test_unknown_section() {
        let err = mps_error("NAME X\nCOLUMNZ\n");
        assert_eq!(err.line, 2);
        assert_eq!(err.kind, MpsErrorKind::UnknownSection("COLUMNZ".into()));
    }

    #[test]
    fn test_invalid_number() {
        let text = SMALL.replace("10.0", "ten");
        let err = mps_error(&text);
        assert_eq!(err.line, 9);
        assert_eq!(err.kind, MpsErrorKind::InvalidNumber("ten".into()));
    }

    #[test]
    fn test_missing_objective() {
        let err = mps_error("ROWS\n L  R1\nCOLUMNS\n    X R1 1\nENDATA\n");
        assert_eq!(err.kind, MpsErrorKind::MissingObjective);
    }

    #[test]
    fn test_duplicate_row() {
        let err = mps_error("ROWS\n N  COST\n L  R1\n G  R1\n");
        assert_eq!(err.line, 4);
        assert_eq!(err.kind, MpsErrorKind::DuplicateRow("R1".into()));
    }

    #[test]
    fn test_data_outside_section() {
        let err = mps_error("    X1 COST 1\n");
        assert_eq!(err.line, 1);
        assert_eq!(err.kind, MpsErrorKind::DataOutsideSection);
    }

    #[test]
    fn test_rhs_without_label_and_objective_offset() {
        let text = SMALL.replace("    RHS       LIM1        10.0", "    LIM1 10.0 COST 3");
        let model = parse_str(&text).unwrap();
        assert_eq!(model.rhs, vec![10.0]);
        assert_eq!(model.objective_offset, -3.0);
    }

    #[test]
    fn test_unindented_data_lines() {
        let text = "\
NAME T
ROWS
N COST
L LIM1
COLUMNS
X1 COST 1.0 LIM1 1.0
X2 COST 2.0 LIM1 1.0
RHS
RHS LIM1 10.0
ENDATA
";
        let model = parse_str(text).unwrap();
        let expected = MpsModel {
            name: "T".into(),
            ..parse_str(SMALL).unwrap()
        };
        assert_eq!(model, expected);
    }

    #[test]
    fn test_indented_headers() {
        let text = SMALL
            .lines()
            .map(|l| format!("  {l}\n"))
            .collect::<String>();
        let model = parse_str(&text).unwrap();
        assert_eq!(model, parse_str(SMALL).unwrap());
    }

    #[test]
    fn test_unindented_objsense_value() {
        let text = SMALL.replace("ROWS\n", "OBJSENSE\nMAX\nROWS\n");
        assert_eq!(parse_str(&text).unwrap().sense, Sense::Maximize);
    }

    #[test]
    fn test_data_after_endata_ignored() {
        let text = format!("{SMALL}garbage here\n");
        assert!(parse_str(&text).is_ok());
    }
}

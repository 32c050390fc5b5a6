//! Loading count files into a trie.
//!
//! Two line formats are understood, matching the output of n-gram counting tools:
//!
//! - unigram: `"<weight> <word>"`, tokenized into the characters of the word;
//! - n-gram: `"<w1><sep><w2><sep>...<sep><rank> <weight> ..."`, tokenized into the
//!   words, with the trailing rank dropped.
//!
//! Malformed lines are skipped one by one and counted in a [`LoadReport`]; only a
//! file that cannot be opened or read aborts a load.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use log::{debug, info};

use crate::trie::Trie;
use crate::{Error, Result};

/// Token separator used by n-gram count files.
pub const DEFAULT_NGRAM_SEPARATOR: &str = "<>";

/// Tokenizes a unigram line of the form `"weight word"`.
///
/// Returns the textual weight and one token per character of the word, or `None`
/// for a blank line or a line with fewer than two space-separated fields.
///
/// # Examples
///
/// ```
/// use token_trie::loader::tokenize_unigram;
///
/// let (weight, tokens) = tokenize_unigram("12 chat\n").unwrap();
/// assert_eq!(weight, "12");
/// assert_eq!(tokens, vec!["c", "h", "a", "t"]);
/// ```
pub fn tokenize_unigram(line: &str) -> Option<(&str, Vec<String>)> {
    let (weight, word) = split_fields(line)?;
    let tokens = word.chars().map(String::from).collect();
    Some((weight, tokens))
}

/// Tokenizes an n-gram line of the form `"w1<sep>w2<sep>rank weight ..."`.
///
/// The first field is split on `separator`; its last piece (the rank) is dropped
/// along with empty pieces. The second field is the weight.
///
/// # Examples
///
/// ```
/// use token_trie::loader::tokenize_ngram;
///
/// let (weight, tokens) = tokenize_ngram("the<>cat<>1 42 17", "<>").unwrap();
/// assert_eq!(weight, "42");
/// assert_eq!(tokens, vec!["the", "cat"]);
/// ```
pub fn tokenize_ngram<'a>(line: &'a str, separator: &str) -> Option<(&'a str, Vec<String>)> {
    let (words, weight) = split_fields(line)?;
    let mut pieces: Vec<&str> = words.split(separator).collect();
    pieces.pop();
    let tokens = pieces
        .into_iter()
        .filter(|piece| !piece.is_empty())
        .map(str::to_owned)
        .collect();
    Some((weight, tokens))
}

// First two single-space separated fields of a stripped, non-blank line
fn split_fields(line: &str) -> Option<(&str, &str)> {
    let stripped = line.trim();
    if stripped.is_empty() {
        return None;
    }

    let mut fields = stripped.split(' ');
    let first = fields.next()?;
    let second = fields.next()?;
    Some((first, second))
}

/// Line format of the files being loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// `"weight word"` lines; tokens are characters
    Unigram,
    /// `"w1<sep>w2<sep>rank weight ..."` lines; tokens are words
    Ngram,
}

impl Default for LoadMode {
    fn default() -> Self {
        LoadMode::Unigram
    }
}

/// Options controlling how lines are tokenized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Line format
    pub mode: LoadMode,
    /// Token separator for [`LoadMode::Ngram`]
    pub separator: String,
}

impl LoadOptions {
    /// Options for unigram files.
    pub fn unigram() -> Self {
        LoadOptions::default()
    }

    /// Options for n-gram files using the default separator.
    pub fn ngram() -> Self {
        LoadOptions::default().with_mode(LoadMode::Ngram)
    }

    /// Sets the line format.
    pub fn with_mode(mut self, mode: LoadMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the n-gram token separator.
    pub fn with_separator<S: Into<String>>(mut self, separator: S) -> Self {
        self.separator = separator.into();
        self
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            mode: LoadMode::Unigram,
            separator: DEFAULT_NGRAM_SEPARATOR.to_owned(),
        }
    }
}

/// Why a line was not inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SkipReason {
    /// Empty or whitespace-only line
    Blank,
    /// Fewer than two space-separated fields
    TooFewFields,
    /// The line yielded no token
    NoTokens,
    /// The weight field could not be parsed
    BadWeight,
    /// The line is not valid UTF-8
    Encoding,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            SkipReason::Blank => "blank line",
            SkipReason::TooFewFields => "fewer than two fields",
            SkipReason::NoTokens => "no tokens",
            SkipReason::BadWeight => "unparsable weight",
            SkipReason::Encoding => "invalid UTF-8",
        };
        f.write_str(reason)
    }
}

/// Summary of a load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Number of files read
    pub files: usize,
    /// Number of lines read
    pub lines: usize,
    /// Number of lines inserted into the trie
    pub inserted: usize,
    /// Number of lines skipped, per reason
    pub skipped: BTreeMap<SkipReason, usize>,
}

impl LoadReport {
    /// Total number of skipped lines.
    pub fn skipped_total(&self) -> usize {
        self.skipped.values().sum()
    }

    /// Number of lines skipped for `reason`.
    pub fn skipped(&self, reason: SkipReason) -> usize {
        self.skipped.get(&reason).copied().unwrap_or(0)
    }

    /// Adds the counts of `other` to this report.
    pub fn merge(&mut self, other: &LoadReport) {
        self.files += other.files;
        self.lines += other.lines;
        self.inserted += other.inserted;
        for (reason, count) in &other.skipped {
            *self.skipped.entry(*reason).or_insert(0) += count;
        }
    }

    fn skip(&mut self, reason: SkipReason) {
        *self.skipped.entry(reason).or_insert(0) += 1;
    }
}

/// Tokenizes lines and inserts them into a trie of string tokens.
#[derive(Debug, Clone, Default)]
pub struct Loader {
    options: LoadOptions,
}

impl Loader {
    /// Creates a loader with the given options.
    pub fn new(options: LoadOptions) -> Self {
        Loader { options }
    }

    /// Returns the loader options.
    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Tokenizes a single line into its textual weight and tokens.
    pub fn tokenize<'a>(&self, line: &'a str) -> std::result::Result<(&'a str, Vec<String>), SkipReason> {
        if line.trim().is_empty() {
            return Err(SkipReason::Blank);
        }

        let tokenized = match self.options.mode {
            LoadMode::Unigram => tokenize_unigram(line),
            LoadMode::Ngram => tokenize_ngram(line, &self.options.separator),
        };

        match tokenized {
            None => Err(SkipReason::TooFewFields),
            Some((_, tokens)) if tokens.is_empty() => Err(SkipReason::NoTokens),
            Some(pair) => Ok(pair),
        }
    }

    /// Inserts one line, returning why it was skipped if it was.
    pub fn load_line<W: FromStr>(&self, trie: &mut Trie<String, W>, line: &str) -> std::result::Result<(), SkipReason> {
        let (weight, tokens) = self.tokenize(line)?;
        let weight = weight.parse::<W>().map_err(|_| SkipReason::BadWeight)?;
        trie.insert(&tokens, weight).map_err(|_| SkipReason::NoTokens)?;
        Ok(())
    }

    /// Inserts every line of `lines`, skipping the malformed ones.
    pub fn load_lines<W, I, S>(&self, trie: &mut Trie<String, W>, lines: I) -> LoadReport
    where
        W: FromStr,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut report = LoadReport::default();
        for line in lines {
            self.record(trie, &mut report, Ok(line.as_ref()));
        }
        report
    }

    /// Inserts every line read from `reader`.
    ///
    /// Lines that are not valid UTF-8 are skipped; read errors abort the load.
    pub fn load_reader<W, R>(&self, trie: &mut Trie<String, W>, reader: R) -> io::Result<LoadReport>
    where
        W: FromStr,
        R: BufRead,
    {
        let mut report = LoadReport::default();
        for raw in reader.split(b'\n') {
            let raw = raw?;
            self.record(trie, &mut report, std::str::from_utf8(&raw).map_err(|_| ()));
        }
        Ok(report)
    }

    /// Loads every file of `paths` into `trie`, in order.
    ///
    /// # Errors
    ///
    /// `Error::Io` for the first file that cannot be opened or read. Lines
    /// inserted from earlier files stay in the trie.
    pub fn load_files<W, I, P>(&self, trie: &mut Trie<String, W>, paths: I) -> Result<LoadReport>
    where
        W: FromStr,
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut report = LoadReport::default();
        for path in paths {
            let path = path.as_ref();
            info!("tokenizing {}", path.display());

            let file_report = File::open(path)
                .and_then(|file| self.load_reader(trie, BufReader::new(file)))
                .map_err(|source| Error::Io {
                    path: path.to_path_buf(),
                    source,
                })?;

            debug!(
                "{}: {} lines, {} inserted, {} skipped",
                path.display(),
                file_report.lines,
                file_report.inserted,
                file_report.skipped_total()
            );
            report.merge(&file_report);
            report.files += 1;
        }

        info!(
            "loaded {} files: {} lines inserted, {} skipped",
            report.files,
            report.inserted,
            report.skipped_total()
        );
        Ok(report)
    }

    fn record<W: FromStr>(
        &self,
        trie: &mut Trie<String, W>,
        report: &mut LoadReport,
        line: std::result::Result<&str, ()>,
    ) {
        report.lines += 1;
        let outcome = match line {
            Ok(line) => self.load_line(trie, line),
            Err(()) => Err(SkipReason::Encoding),
        };

        match outcome {
            Ok(()) => report.inserted += 1,
            Err(reason) => {
                debug!("skipped line {}: {}", report.lines, reason);
                report.skip(reason);
            }
        }
    }
}

impl<W: FromStr> Trie<String, W> {
    /// Builds a trie from count files.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use token_trie::{LoadOptions, Trie};
    ///
    /// let (trie, report) = Trie::<String, u64>::from_files(&["unigrams.cnt"], &LoadOptions::unigram())?;
    /// println!("{} keys, {} lines skipped", trie.len(), report.skipped_total());
    /// # Ok::<(), token_trie::Error>(())
    /// ```
    pub fn from_files<I, P>(paths: I, options: &LoadOptions) -> Result<(Self, LoadReport)>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut trie = Trie::new();
        let report = Loader::new(options.clone()).load_files(&mut trie, paths)?;
        Ok((trie, report))
    }
}

// Enable cfg badges on docs.rs (optional but nice)
#![cfg_attr(docsrs, feature(doc_cfg))]

//! High-performance Chinese text converter using OpenCC lexicons and FMM segmentation.
//!
//! This crate provides efficient segment-based conversion between Simplified and Traditional
//! Chinese, including the Taiwan and Hong Kong regional forms and Japanese Shinjitai. It uses
//! dictionary-based longest-match segmentation with multistage round composition, and supports
//! parallel processing of large inputs via Rayon.
//!
//! # Example
//! ```rust
//! use opencc_fmmseg::OpenCC;
//!
//! let input = "汉字转换测试";
//! let opencc = OpenCC::new();
//! let output = opencc.convert(input, false);
//! assert_eq!(output, "漢字轉換測試");
//! ```
//!
//! See [README](https://github.com/laisuk/opencc-fmmseg) for more usage examples.
use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;
use rustc_hash::FxHashMap;
use std::sync::Mutex;

/// Delimiters helper for splitting and matching delimiters.
pub mod delimiter_set;
/// Bridge helper for conversion plan and core converter functions.
mod dict_refs;
/// Dictionary utilities for managing multiple OpenCC lexicons.
pub mod dictionary_lib;
/// Small UTF-8/UTF-16 boundary and bitmask helpers shared by the segmentation engine.
pub mod utils;

use crate::delimiter_set::is_delimiter;
pub use crate::dict_refs::DictRefs;
use crate::dictionary_lib::dictionary_maxlength::UnionKey;
use crate::dictionary_lib::StarterUnion;
use crate::utils::{find_max_utf8_length, for_each_len_dec};
use dictionary_lib::dict_max_len::DictMaxLen;
use dictionary_lib::DictionaryMaxlength;

/// Thread-safe holder for the last error message (if any).
static LAST_ERROR: Lazy<Mutex<Option<String>>> = Lazy::new(|| Mutex::new(None));
/// Regular expression used to normalize or strip punctuation from input during `zho_check`.
static STRIP_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[!-/:-@\[-`{-~\t\n\v\f\r 0-9A-Za-z_著]").unwrap());

/// The 16 supported configuration names, in the order `zho_check` and the CLI enumerate them.
pub const SUPPORTED_CONFIGS: [&str; 16] = [
    "s2t", "t2s", "s2tw", "tw2s", "s2twp", "tw2sp", "s2hk", "hk2s", "t2tw", "t2twp", "t2hk",
    "tw2t", "tw2tp", "hk2t", "t2jp", "jp2t",
];

const DEFAULT_CONFIG: &str = "s2t";

/// Central interface for performing OpenCC-based conversion with segmentation.
///
/// `OpenCC` owns a loaded [`DictionaryMaxlength`], a current configuration name, and a couple
/// of runtime toggles (parallelism, verbose diagnostics). Conversion methods are read-only
/// (`&self`); only `set_config`, `set_parallel` and `set_verbose_logging` require `&mut self`.
pub struct OpenCC {
    /// Dictionary storage with length metadata for maximum matching.
    dictionary: DictionaryMaxlength,
    /// Flag indicator for parallelism.
    is_parallel: bool,
    /// Current configuration name (always one of [`SUPPORTED_CONFIGS`]).
    config: String,
    /// Opt-in diagnostic channel; disabled by default.
    verbose: bool,
}

impl Default for OpenCC {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenCC {
    /// Creates a new `OpenCC` instance using the embedded default dictionary and configuration
    /// `"s2t"`.
    ///
    /// This is the recommended method for most users. It loads the dictionaries embedded into
    /// the binary at build time (via `include_str!`), so there is no disk I/O cost at startup.
    ///
    /// # Panics
    /// Never panics. If the embedded dictionary fails to parse, an empty dictionary is
    /// substituted and the error is stored internally via `set_last_error()`.
    pub fn new() -> Self {
        let dictionary = DictionaryMaxlength::from_embedded().unwrap_or_else(|err| {
            Self::set_last_error(&format!("Failed to create dictionary: {}", err));
            DictionaryMaxlength::default()
        });

        OpenCC {
            dictionary,
            is_parallel: true,
            config: DEFAULT_CONFIG.to_string(),
            verbose: false,
        }
    }

    /// Creates an `OpenCC` instance with the embedded dictionary and a specific starting
    /// configuration.
    ///
    /// An unrecognised `config` does not fail construction: the configuration falls back to
    /// `"s2t"` and the reason is recorded via [`get_last_error`](Self::get_last_error).
    pub fn with_config(config: &str) -> Self {
        let mut cc = Self::new();
        cc.set_config(config);
        cc
    }

    /// Creates an `OpenCC` instance by loading dictionaries from plaintext `.txt` lexicon files
    /// on disk.
    ///
    /// Useful for development and for deployments that ship the full OpenCC lexicons
    /// separately from the binary. See [`DictionaryMaxlength::from_dicts`] for the expected
    /// directory layout and file format.
    pub fn from_dicts(base_dir: &str) -> Self {
        let dictionary = DictionaryMaxlength::from_dicts(base_dir).unwrap_or_else(|err| {
            Self::set_last_error(&format!("Failed to create dictionary: {}", err));
            DictionaryMaxlength::default()
        });

        OpenCC {
            dictionary,
            is_parallel: true,
            config: DEFAULT_CONFIG.to_string(),
            verbose: false,
        }
    }

    /// Creates an `OpenCC` instance by loading dictionaries from a JSON snapshot file.
    ///
    /// See [`dictionary_lib::DictionaryMaxlength::from_snapshot_str`] for the schema.
    pub fn from_snapshot_file(path: &str) -> Self {
        let dictionary = DictionaryMaxlength::from_snapshot_file(path).unwrap_or_else(|err| {
            Self::set_last_error(&format!("Failed to create dictionary: {}", err));
            DictionaryMaxlength::default()
        });

        OpenCC {
            dictionary,
            is_parallel: true,
            config: DEFAULT_CONFIG.to_string(),
            verbose: false,
        }
    }

    /// Creates an `OpenCC` instance by loading dictionaries from an external CBOR file.
    ///
    /// Ideal for users who want to decouple dictionary data from the binary and ship a
    /// compact `.cbor` file with the application.
    pub fn from_cbor(filename: &str) -> Self {
        let dictionary =
            DictionaryMaxlength::deserialize_from_cbor(filename).unwrap_or_else(|err| {
                Self::set_last_error(&format!("Failed to create dictionary: {}", err));
                DictionaryMaxlength::default()
            });

        OpenCC {
            dictionary,
            is_parallel: true,
            config: DEFAULT_CONFIG.to_string(),
            verbose: false,
        }
    }

    /// Splits a slice of characters into a list of index ranges based on delimiter boundaries.
    ///
    /// If `inclusive == true`, a delimiter at position `i` causes a range `start..i+1`.
    /// If `inclusive == false`, two ranges are emitted: `start..i` (content) and `i..i+1`
    /// (delimiter). Trailing content after the last delimiter is included as the final range.
    fn get_chars_range(&self, chars: &[char], inclusive: bool) -> Vec<std::ops::Range<usize>> {
        let mut ranges = Vec::new();
        let mut start = 0;

        for (i, ch) in chars.iter().enumerate() {
            if is_delimiter(*ch) {
                if inclusive {
                    ranges.push(start..i + 1);
                } else {
                    if i > start {
                        ranges.push(start..i);
                    }
                    ranges.push(i..i + 1);
                }
                start = i + 1;
            }
        }

        if start < chars.len() {
            ranges.push(start..chars.len());
        }

        ranges
    }

    /// Internal bridge that drives FMM conversion using a precomputed **starter union**.
    ///
    /// Splits `text` into delimiter-aware segments, then converts each segment independently via
    /// [`convert_by_union`](Self::convert_by_union). A single prebuilt [`StarterUnion`] is reused
    /// across all segments for one call. Sequential and parallel execution are required to
    /// produce byte-identical output; the split is purely an optimisation.
    #[inline]
    fn segment_replace_with_union(
        &self,
        text: &str,
        dictionaries: &[&DictMaxLen],
        max_word_length: usize,
        union: &StarterUnion,
    ) -> String {
        let chars: Vec<char> = if self.is_parallel {
            text.par_chars().collect()
        } else {
            text.chars().collect()
        };

        let ranges = self.get_chars_range(&chars, false);

        if self.verbose {
            eprintln!(
                "[opencc-fmmseg] segment_replace: {} chars, {} segments, parallel={}",
                chars.len(),
                ranges.len(),
                self.is_parallel
            );
        }

        if self.is_parallel {
            ranges
                .into_par_iter()
                .with_min_len(8)
                .map(|r| self.convert_by_union(&chars[r], dictionaries, max_word_length, union))
                .reduce(String::new, |mut a, b| {
                    a.push_str(&b);
                    a
                })
        } else {
            let mut out = String::with_capacity(text.len());
            for r in ranges {
                out.push_str(&self.convert_by_union(
                    &chars[r],
                    dictionaries,
                    max_word_length,
                    union,
                ));
            }
            out
        }
    }

    /// Core dictionary-matching routine (FMM) accelerated by a precomputed **starter union**.
    ///
    /// Scans a delimiter-free `&[char]` segment left-to-right. At each position the union's
    /// bitmask/cap tables prune impossible lengths before any per-dictionary lookup is
    /// attempted; viable lengths are tried longest-first via [`for_each_len_dec`], and the
    /// first dictionary (in priority order) holding a matching key wins the tie.
    #[inline(always)]
    pub fn convert_by_union(
        &self,
        text_chars: &[char],
        dictionaries: &[&DictMaxLen],
        max_word_length: usize,
        union: &StarterUnion,
    ) -> String {
        if text_chars.is_empty() {
            return String::new();
        }

        let text_length = text_chars.len();
        if text_length == 1 && is_delimiter(text_chars[0]) {
            return text_chars[0].to_string();
        }

        let is_multi_dicts = dictionaries.len() > 1;
        let mut result = String::with_capacity(text_length * 4);
        let mut start_pos = 0;

        while start_pos < text_length {
            let c0 = text_chars[start_pos];
            let u0 = c0 as u32;
            let rem = text_length - start_pos;
            let global_cap = max_word_length.min(rem);

            let (mask, cap_u8) = if u0 <= 0xFFFF {
                let idx = u0 as usize;
                (union.bmp_mask[idx], union.bmp_cap[idx])
            } else {
                (
                    *union.astral_mask.get(&c0).unwrap_or(&0),
                    *union.astral_cap.get(&c0).unwrap_or(&0),
                )
            };

            if mask == 0 || cap_u8 == 0 {
                result.push(c0);
                start_pos += 1;
                continue;
            }

            let cap_here = global_cap.min(cap_u8 as usize);
            let mut matched = false;

            let text_ptr = text_chars.as_ptr();

            for_each_len_dec(mask, cap_here, |length| {
                let cap_bit = if length >= 64 { 63 } else { length - 1 };
                let mut data_ptr: *const char = std::ptr::null();
                let mut data_len: usize = 0;

                for &dict in dictionaries {
                    if !dict.has_key_len(length) {
                        continue;
                    }
                    if is_multi_dicts && !dict.starter_allows_dict(c0, length, cap_bit) {
                        continue;
                    }
                    if data_ptr.is_null() {
                        debug_assert!(start_pos < text_length);
                        debug_assert!(length <= text_length - start_pos);
                        data_ptr = unsafe { text_ptr.add(start_pos) };
                        data_len = length;
                    }

                    let slice: &[char] = unsafe { std::slice::from_raw_parts(data_ptr, data_len) };

                    if let Some(val) = dict.map.get(slice) {
                        result.push_str(val);
                        start_pos += length;
                        matched = true;
                        return true;
                    }
                }

                false
            });

            if !matched {
                result.push(c0);
                start_pos += 1;
            }
        }

        result
    }

    /// Converts text using the given dictionaries with greedy maximum-match, without a
    /// precomputed [`StarterUnion`].
    ///
    /// Simpler but slower than [`convert_by_union`](Self::convert_by_union); used where a
    /// single character dictionary is probed (e.g. the inner passes of [`zho_check`](Self::zho_check)).
    fn convert_by(
        &self,
        text_chars: &[char],
        dictionaries: &[&DictMaxLen],
        max_word_length: usize,
    ) -> String {
        if text_chars.is_empty() {
            return String::new();
        }

        let text_length = text_chars.len();
        if text_length == 1 && is_delimiter(text_chars[0]) {
            return text_chars[0].to_string();
        }

        let mut result = String::with_capacity(text_length * 4);
        let mut start_pos = 0;

        while start_pos < text_length {
            let max_length = max_word_length.min(text_length - start_pos);
            let mut best_match_length = 0usize;
            let mut best_match: &str = "";

            for length in (1..=max_length).rev() {
                let candidate = &text_chars[start_pos..start_pos + length];

                for dictionary in dictionaries {
                    if !dictionary.has_key_len(length) {
                        continue;
                    }
                    if let Some(value) = dictionary.map.get(candidate) {
                        best_match_length = length;
                        best_match = value;
                        break;
                    }
                }

                if best_match_length > 0 {
                    break;
                }
            }

            if best_match_length == 0 {
                result.push(text_chars[start_pos]);
                start_pos += 1;
                continue;
            }

            result.push_str(best_match);
            start_pos += best_match_length;
        }

        result
    }

    /// Returns whether parallel segment conversion is currently enabled.
    pub fn get_parallel(&self) -> bool {
        self.is_parallel
    }

    /// Sets whether to enable or disable parallel segment conversion.
    pub fn set_parallel(&mut self, is_parallel: bool) {
        self.is_parallel = is_parallel;
    }

    /// Enables or disables the opt-in diagnostic channel.
    ///
    /// When enabled, informational messages about segment splitting and config fallbacks are
    /// printed to stderr. Disabled by default.
    pub fn set_verbose_logging(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Returns whether the diagnostic channel is currently enabled.
    pub fn is_verbose_logging(&self) -> bool {
        self.verbose
    }

    /// Sets the active configuration used by [`convert`](Self::convert).
    ///
    /// An unrecognised `name` does **not** fail: the configuration falls back to `"s2t"` and
    /// the reason is recorded via [`get_last_error`](Self::get_last_error). Comparison is
    /// case-insensitive.
    pub fn set_config(&mut self, name: &str) {
        let lower = name.to_lowercase();
        if Self::is_supported_config(&lower) {
            self.config = lower;
        } else {
            Self::set_last_error(&format!(
                "Invalid config: '{}', falling back to '{}'",
                name, DEFAULT_CONFIG
            ));
            self.config = DEFAULT_CONFIG.to_string();
        }
        if self.verbose {
            eprintln!("[opencc-fmmseg] config set to '{}'", self.config);
        }
    }

    /// Returns the currently active configuration name.
    pub fn get_config(&self) -> &str {
        &self.config
    }

    /// Returns `true` if `name` (case-insensitive) is one of the 16 supported configurations.
    pub fn is_supported_config(name: &str) -> bool {
        let lower = name.to_lowercase();
        SUPPORTED_CONFIGS.contains(&lower.as_str())
    }

    /// Returns the list of all supported configuration names.
    pub fn get_supported_configs() -> Vec<&'static str> {
        SUPPORTED_CONFIGS.to_vec()
    }

    /// Converts Simplified Chinese text to Traditional Chinese.
    ///
    /// Uses phrase-level (`st_phrases`) then character-level (`st_characters`) dictionaries;
    /// when `punctuation` is set, `st_punctuations` is folded into the same round.
    pub fn s2t(&self, input: &str, punctuation: bool) -> String {
        let mut round_1: Vec<&DictMaxLen> =
            vec![&self.dictionary.st_phrases, &self.dictionary.st_characters];

        if punctuation {
            round_1.push(&self.dictionary.st_punctuations);
        }

        let union = self
            .dictionary
            .union_for(UnionKey::S2T { punct: punctuation });

        DictRefs::new(&round_1, union).apply_segment_replace(
            input,
            |input, refs, max_len, union| {
                self.segment_replace_with_union(input, refs, max_len, union)
            },
        )
    }

    /// Performs Traditional-to-Simplified Chinese conversion.
    pub fn t2s(&self, input: &str, punctuation: bool) -> String {
        let mut round_1: Vec<&DictMaxLen> =
            vec![&self.dictionary.ts_phrases, &self.dictionary.ts_characters];

        if punctuation {
            round_1.push(&self.dictionary.ts_punctuations);
        }

        let union = self
            .dictionary
            .union_for(UnionKey::T2S { punct: punctuation });

        DictRefs::new(&round_1, union).apply_segment_replace(
            input,
            |input, refs, max_len, union| {
                self.segment_replace_with_union(input, refs, max_len, union)
            },
        )
    }

    /// Performs Simplified-to-Taiwanese conversion.
    pub fn s2tw(&self, input: &str, punctuation: bool) -> String {
        let mut round_1: Vec<&DictMaxLen> =
            vec![&self.dictionary.st_phrases, &self.dictionary.st_characters];

        if punctuation {
            round_1.push(&self.dictionary.st_punctuations);
        }

        let u1 = self
            .dictionary
            .union_for(UnionKey::S2T { punct: punctuation });
        let round_2 = [&self.dictionary.tw_variants];
        let u2 = self.dictionary.union_for(UnionKey::TwVariantsOnly);

        DictRefs::new(&round_1, u1)
            .with_round_2(&round_2, u2)
            .apply_segment_replace(input, |input, refs, max_len, union| {
                self.segment_replace_with_union(input, refs, max_len, union)
            })
    }

    /// Performs Taiwanese-to-Simplified conversion.
    pub fn tw2s(&self, input: &str, punctuation: bool) -> String {
        let mut round_2: Vec<&DictMaxLen> =
            vec![&self.dictionary.ts_phrases, &self.dictionary.ts_characters];

        if punctuation {
            round_2.push(&self.dictionary.ts_punctuations);
        }

        let u1 = self.dictionary.union_for(UnionKey::TwRevPair);
        let u2 = self
            .dictionary
            .union_for(UnionKey::T2S { punct: punctuation });

        DictRefs::new(
            &[
                &self.dictionary.tw_variants_rev_phrases,
                &self.dictionary.tw_variants_rev,
            ],
            u1,
        )
        .with_round_2(&round_2, u2)
        .apply_segment_replace(input, |input, refs, max_len, union| {
            self.segment_replace_with_union(input, refs, max_len, union)
        })
    }

    /// Performs Simplified-to-Traditional-Taiwan conversion with phrase substitution.
    pub fn s2twp(&self, input: &str, punctuation: bool) -> String {
        let mut round_1: Vec<&DictMaxLen> =
            vec![&self.dictionary.st_phrases, &self.dictionary.st_characters];

        if punctuation {
            round_1.push(&self.dictionary.st_punctuations);
        }

        let u1 = self
            .dictionary
            .union_for(UnionKey::S2T { punct: punctuation });

        let round_2 = [&self.dictionary.tw_phrases];
        let u2 = self.dictionary.union_for(UnionKey::TwPhrasesOnly);

        let round_3 = [&self.dictionary.tw_variants];
        let u3 = self.dictionary.union_for(UnionKey::TwVariantsOnly);

        DictRefs::new(&round_1, u1)
            .with_round_2(&round_2, u2)
            .with_round_3(&round_3, u3)
            .apply_segment_replace(input, |input, refs, max_len, union| {
                self.segment_replace_with_union(input, refs, max_len, union)
            })
    }

    /// Performs Traditional-Taiwan-to-Simplified conversion with phrase substitution.
    pub fn tw2sp(&self, input: &str, punctuation: bool) -> String {
        let round_1 = [
            &self.dictionary.tw_phrases_rev,
            &self.dictionary.tw_variants_rev_phrases,
            &self.dictionary.tw_variants_rev,
        ];
        let u1 = self.dictionary.union_for(UnionKey::Tw2SpR1TwRevTriple);
        let mut round_2: Vec<&DictMaxLen> =
            vec![&self.dictionary.ts_phrases, &self.dictionary.ts_characters];

        if punctuation {
            round_2.push(&self.dictionary.ts_punctuations);
        }
        let u2 = self
            .dictionary
            .union_for(UnionKey::T2S { punct: punctuation });

        DictRefs::new(&round_1, u1)
            .with_round_2(&round_2, u2)
            .apply_segment_replace(input, |input, refs, max_len, union| {
                self.segment_replace_with_union(input, refs, max_len, union)
            })
    }

    /// Performs Simplified-to-Traditional-Hong-Kong conversion.
    pub fn s2hk(&self, input: &str, punctuation: bool) -> String {
        let mut round_1: Vec<&DictMaxLen> =
            vec![&self.dictionary.st_phrases, &self.dictionary.st_characters];

        if punctuation {
            round_1.push(&self.dictionary.st_punctuations);
        }
        let u1 = self
            .dictionary
            .union_for(UnionKey::S2T { punct: punctuation });
        let round_2 = [&self.dictionary.hk_variants];
        let u2 = self.dictionary.union_for(UnionKey::HkVariantsOnly);
        DictRefs::new(&round_1, u1)
            .with_round_2(&round_2, u2)
            .apply_segment_replace(input, |input, refs, max_len, union| {
                self.segment_replace_with_union(input, refs, max_len, union)
            })
    }

    /// Performs Traditional-Hong-Kong-to-Simplified conversion.
    pub fn hk2s(&self, input: &str, punctuation: bool) -> String {
        let round_1 = [
            &self.dictionary.hk_variants_rev_phrases,
            &self.dictionary.hk_variants_rev,
        ];
        let u1 = self.dictionary.union_for(UnionKey::HkRevPair);
        let mut round_2: Vec<&DictMaxLen> =
            vec![&self.dictionary.ts_phrases, &self.dictionary.ts_characters];

        if punctuation {
            round_2.push(&self.dictionary.ts_punctuations);
        }
        let u2 = self
            .dictionary
            .union_for(UnionKey::T2S { punct: punctuation });
        DictRefs::new(&round_1, u1)
            .with_round_2(&round_2, u2)
            .apply_segment_replace(input, |input, refs, max_len, union| {
                self.segment_replace_with_union(input, refs, max_len, union)
            })
    }

    /// Performs Traditional-to-Traditional-Taiwan conversion.
    pub fn t2tw(&self, input: &str) -> String {
        let round_1 = [&self.dictionary.tw_variants];
        let u1 = self.dictionary.union_for(UnionKey::TwVariantsOnly);
        DictRefs::new(&round_1, u1).apply_segment_replace(
            input,
            |input, refs, max_len, union| {
                self.segment_replace_with_union(input, refs, max_len, union)
            },
        )
    }

    /// Performs Traditional-to-Traditional-Taiwan conversion with phrase substitution.
    pub fn t2twp(&self, input: &str) -> String {
        let round_1 = [&self.dictionary.tw_phrases];
        let u1 = self.dictionary.union_for(UnionKey::TwPhrasesOnly);
        let round_2 = [&self.dictionary.tw_variants];
        let u2 = self.dictionary.union_for(UnionKey::TwVariantsOnly);
        DictRefs::new(&round_1, u1)
            .with_round_2(&round_2, u2)
            .apply_segment_replace(input, |input, refs, max_len, union| {
                self.segment_replace_with_union(input, refs, max_len, union)
            })
    }

    /// Performs Traditional-Taiwan-to-Traditional conversion.
    pub fn tw2t(&self, input: &str) -> String {
        let round_1 = [
            &self.dictionary.tw_variants_rev_phrases,
            &self.dictionary.tw_variants_rev,
        ];
        let u1 = self.dictionary.union_for(UnionKey::TwRevPair);

        DictRefs::new(&round_1, u1).apply_segment_replace(
            input,
            |input, refs, max_len, union| {
                self.segment_replace_with_union(input, refs, max_len, union)
            },
        )
    }

    /// Performs Traditional-Taiwan-to-Traditional conversion with phrase substitution.
    pub fn tw2tp(&self, input: &str) -> String {
        let round_1 = [
            &self.dictionary.tw_variants_rev_phrases,
            &self.dictionary.tw_variants_rev,
        ];
        let u1 = self.dictionary.union_for(UnionKey::TwRevPair);

        let round_2 = [&self.dictionary.tw_phrases_rev];
        let u2 = self.dictionary.union_for(UnionKey::TwPhrasesRevOnly);

        DictRefs::new(&round_1, u1)
            .with_round_2(&round_2, u2)
            .apply_segment_replace(input, |input, refs, max_len, union| {
                self.segment_replace_with_union(input, refs, max_len, union)
            })
    }

    /// Performs Traditional-to-Traditional-Hong-Kong conversion.
    pub fn t2hk(&self, input: &str) -> String {
        let round_1 = [&self.dictionary.hk_variants];
        let u1 = self.dictionary.union_for(UnionKey::HkVariantsOnly);
        DictRefs::new(&round_1, u1).apply_segment_replace(
            input,
            |input, refs, max_len, union| {
                self.segment_replace_with_union(input, refs, max_len, union)
            },
        )
    }

    /// Performs Traditional-Hong-Kong-to-Traditional conversion.
    pub fn hk2t(&self, input: &str) -> String {
        let round_1 = [
            &self.dictionary.hk_variants_rev_phrases,
            &self.dictionary.hk_variants_rev,
        ];
        let u1 = self.dictionary.union_for(UnionKey::HkRevPair);
        DictRefs::new(&round_1, u1).apply_segment_replace(
            input,
            |input, refs, max_len, union| {
                self.segment_replace_with_union(input, refs, max_len, union)
            },
        )
    }

    /// Performs Japanese Kyujitai-to-Shinjitai conversion.
    pub fn t2jp(&self, input: &str) -> String {
        let round_1 = [&self.dictionary.jp_variants];
        let u1 = self.dictionary.union_for(UnionKey::JpVariantsOnly);
        DictRefs::new(&round_1, u1).apply_segment_replace(
            input,
            |input, refs, max_len, union| {
                self.segment_replace_with_union(input, refs, max_len, union)
            },
        )
    }

    /// Performs Japanese Shinjitai-to-Kyujitai conversion.
    pub fn jp2t(&self, input: &str) -> String {
        let round_1 = [
            &self.dictionary.jps_phrases,
            &self.dictionary.jps_characters,
            &self.dictionary.jp_variants_rev,
        ];
        let u1 = self.dictionary.union_for(UnionKey::JpRevTriple);
        DictRefs::new(&round_1, u1).apply_segment_replace(
            input,
            |input, refs, max_len, union| {
                self.segment_replace_with_union(input, refs, max_len, union)
            },
        )
    }

    /// Converts `input` using the current configuration (see [`get_config`](Self::get_config) /
    /// [`set_config`](Self::set_config)).
    ///
    /// This is the primary entry point for text transformation. The current configuration is
    /// always one of [`SUPPORTED_CONFIGS`] (invalid names are rejected at `set_config` time), so
    /// this method never fails.
    ///
    /// # Example
    /// ```rust
    /// use opencc_fmmseg::OpenCC;
    ///
    /// let mut cc = OpenCC::new();
    /// cc.set_config("s2twp");
    /// assert_eq!(cc.convert("汉字", false), "漢字");
    /// ```
    pub fn convert(&self, input: &str, punctuation: bool) -> String {
        self.convert_with_config(input, &self.config, punctuation)
    }

    /// Converts `input` using an explicitly named configuration, ignoring the instance's
    /// current configuration.
    ///
    /// Unlike [`convert`](Self::convert), an invalid `config` here does not fall back silently:
    /// it returns a short diagnostic string and records the same message via
    /// [`get_last_error`](Self::get_last_error). Prefer [`set_config`](Self::set_config) +
    /// [`convert`](Self::convert) for the stateful, always-valid facade.
    pub fn convert_with_config(&self, input: &str, config: &str, punctuation: bool) -> String {
        match config.to_lowercase().as_str() {
            "s2t" => self.s2t(input, punctuation),
            "s2tw" => self.s2tw(input, punctuation),
            "s2twp" => self.s2twp(input, punctuation),
            "s2hk" => self.s2hk(input, punctuation),
            "t2s" => self.t2s(input, punctuation),
            "t2tw" => self.t2tw(input),
            "t2twp" => self.t2twp(input),
            "t2hk" => self.t2hk(input),
            "tw2s" => self.tw2s(input, punctuation),
            "tw2sp" => self.tw2sp(input, punctuation),
            "tw2t" => self.tw2t(input),
            "tw2tp" => self.tw2tp(input),
            "hk2s" => self.hk2s(input, punctuation),
            "hk2t" => self.hk2t(input),
            "jp2t" => self.jp2t(input),
            "t2jp" => self.t2jp(input),
            _ => {
                let msg = format!("Invalid config: {}", config);
                Self::set_last_error(&msg);
                msg
            }
        }
    }

    /// Internal: fast character-level Simplified-to-Traditional pass used by [`zho_check`](Self::zho_check).
    ///
    /// Bypasses phrase-level and punctuation dictionaries for speed.
    fn st(&self, input: &str) -> String {
        let dict_refs = [&self.dictionary.st_characters];
        let chars: Vec<char> = if self.is_parallel {
            input.par_chars().collect()
        } else {
            input.chars().collect()
        };
        self.convert_by(&chars, &dict_refs, 1)
    }

    /// Internal: fast character-level Traditional-to-Simplified pass used by [`zho_check`](Self::zho_check).
    fn ts(&self, input: &str) -> String {
        let dict_refs = [&self.dictionary.ts_characters];
        let chars: Vec<char> = if self.is_parallel {
            input.par_chars().collect()
        } else {
            input.chars().collect()
        };
        self.convert_by(&chars, &dict_refs, 1)
    }

    /// Detects the likely Chinese script type of `input`.
    ///
    /// Strips non-CJK characters from a bounded prefix, then compares the original against a
    /// single-character Traditional-to-Simplified pass and a single-character
    /// Simplified-to-Traditional pass.
    ///
    /// Returns:
    /// - `1` if the input appears Traditional (the `t2s` pass changed it, the `s2t` pass did not).
    /// - `2` if the input appears Simplified (the converse).
    /// - `0` if the input is empty, mixed, or not clearly Chinese.
    ///
    /// # Examples
    /// ```rust
    /// use opencc_fmmseg::OpenCC;
    /// let cc = OpenCC::new();
    /// assert_eq!(cc.zho_check("漢字"), 1);
    /// assert_eq!(cc.zho_check("汉字"), 2);
    /// assert_eq!(cc.zho_check("hello"), 0);
    /// ```
    pub fn zho_check(&self, input: &str) -> i32 {
        if input.is_empty() {
            return 0;
        }
        // Bound the scan to the first ~100 code points (≈1000 bytes) before the strip regex runs.
        let check_len = find_max_utf8_length(input, 1000);

        let stripped = STRIP_REGEX.replace_all(&input[..check_len], "");
        let max_bytes = find_max_utf8_length(&stripped, 200);
        let strip_text = &stripped[..max_bytes];

        let result = match (
            strip_text != self.ts(strip_text),
            strip_text != self.st(strip_text),
        ) {
            (true, _) => 1,
            (_, true) => 2,
            _ => 0,
        };

        if self.verbose {
            eprintln!("[opencc-fmmseg] zho_check({:?}) -> {}", strip_text, result);
        }

        result
    }

    /// Legacy punctuation swap predating the `*_punctuations` dictionaries.
    ///
    /// The round-based punctuation scheme used by [`s2t`](Self::s2t) et al. supersedes this.
    /// Kept for reference; no call sites remain in this crate.
    #[allow(dead_code)]
    fn convert_punctuation(text: &str, config: &str) -> String {
        let mut s2t_punctuation_chars: FxHashMap<&str, &str> = FxHashMap::default();
        s2t_punctuation_chars.insert("\u{201c}", "\u{300c}");
        s2t_punctuation_chars.insert("\u{201d}", "\u{300d}");
        s2t_punctuation_chars.insert("\u{2018}", "\u{300e}");
        s2t_punctuation_chars.insert("\u{2019}", "\u{300f}");

        let t2s_punctuation_chars: FxHashMap<&str, &str> = s2t_punctuation_chars
            .iter()
            .map(|(&k, &v)| (v, k))
            .collect();

        let mapping = if config.starts_with('s') {
            &s2t_punctuation_chars
        } else {
            &t2s_punctuation_chars
        };

        let pattern = mapping
            .keys()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");

        let regex = Regex::new(&pattern).unwrap();

        regex
            .replace_all(text, |caps: &regex::Captures| {
                mapping[caps.get(0).unwrap().as_str()]
            })
            .into_owned()
    }

    /// Records an error message as the most recent OpenCC runtime error.
    pub fn set_last_error(err_msg: &str) {
        let mut last_error = LAST_ERROR.lock().unwrap();
        *last_error = Some(err_msg.to_string());
    }

    /// Retrieves the most recently recorded error message, if any.
    pub fn get_last_error() -> Option<String> {
        let last_error = LAST_ERROR.lock().unwrap();
        last_error.clone()
    }
}

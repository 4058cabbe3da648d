#[cfg(test)]
mod tests {
    use opencc_fmmseg::dictionary_lib::{DictMaxLen, DictionaryMaxlength};

    // Helper to collect all DictMaxLen refs (keeps count logic in one place)
    fn all_dicts(d: &DictionaryMaxlength) -> [&DictMaxLen; 18] {
        [
            &d.st_characters,
            &d.st_phrases,
            &d.ts_characters,
            &d.ts_phrases,
            &d.tw_phrases,
            &d.tw_phrases_rev,
            &d.tw_variants,
            &d.tw_variants_rev,
            &d.tw_variants_rev_phrases,
            &d.hk_variants,
            &d.hk_variants_rev,
            &d.hk_variants_rev_phrases,
            &d.jps_characters,
            &d.jps_phrases,
            &d.jp_variants,
            &d.jp_variants_rev,
            &d.st_punctuations,
            &d.ts_punctuations,
        ]
    }

    fn count(d: &DictionaryMaxlength) -> (usize, usize) {
        let all = all_dicts(d);
        let total = all.len();
        let non_empty = all.iter().filter(|x| !x.map.is_empty()).count();
        (total, non_empty)
    }

    #[test]
    fn embedded_dictionary_loads_all_18_tables() {
        let dicts = DictionaryMaxlength::from_embedded().expect("embedded dictionary should load");
        let (total, non_empty) = count(&dicts);
        assert_eq!(total, 18);
        assert_eq!(non_empty, 18, "every seed lexicon should contain at least one entry");
    }

    #[test]
    fn roundtrip_embedded_through_plaintext_dicts() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let base_dir = dir.path().to_str().unwrap();

        let original = DictionaryMaxlength::from_embedded().expect("embedded dictionary should load");
        original
            .to_dicts(base_dir)
            .expect("should write plaintext lexicons");

        let reloaded = DictionaryMaxlength::from_dicts(base_dir)
            .expect("should reload plaintext lexicons from the directory just written");

        let (t1, n1) = count(&original);
        let (t2, n2) = count(&reloaded);
        assert_eq!(t1, t2);
        assert_eq!(n1, n2);
        assert_eq!(original.st_phrases.max_len, reloaded.st_phrases.max_len);
        assert_eq!(original.st_phrases.map.len(), reloaded.st_phrases.map.len());
    }

    #[test]
    fn roundtrip_embedded_through_cbor() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("opencc_dict.cbor");

        let original = DictionaryMaxlength::from_embedded().expect("embedded dictionary should load");
        original
            .serialize_to_cbor(&path)
            .expect("should serialize to CBOR");

        let reloaded =
            DictionaryMaxlength::deserialize_from_cbor(&path).expect("should deserialize from CBOR");

        let (t1, n1) = count(&original);
        let (t2, n2) = count(&reloaded);
        assert_eq!(t1, t2);
        assert_eq!(n1, n2);
    }
}

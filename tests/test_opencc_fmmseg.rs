#[cfg(test)]
mod tests {
    use opencc_fmmseg::OpenCC;

    #[test]
    fn s2t_prefers_phrase_over_character_mapping() {
        let cc = OpenCC::new();
        // STCharacters alone would map 发 -> 發; STPhrases overrides the word as a whole
        // so the "hair" sense (髮) wins over the generic "發" collapse.
        assert_eq!(cc.s2t("头发", false), "頭髮");
    }

    #[test]
    fn s2t_with_punctuation_applies_curly_to_corner_quotes() {
        let cc = OpenCC::new();
        assert_eq!(cc.s2t("“你好”", true), "「你好」");
        assert_eq!(cc.s2t("“你好”", false), "“你好”");
    }

    #[test]
    fn s2tw_applies_taiwan_glyph_variant_after_s2t() {
        let cc = OpenCC::new();
        assert_eq!(cc.s2tw("汉字", false), "漢字");
    }

    #[test]
    fn tw2sp_runs_reverse_variant_round_then_t2s() {
        let cc = OpenCC::new();
        assert_eq!(cc.tw2sp("臺灣", false), "台湾");
        assert_eq!(cc.tw2sp("臺北", false), "台北");
    }

    #[test]
    fn t2jp_converts_kyujitai_to_shinjitai() {
        let cc = OpenCC::new();
        assert_eq!(cc.t2jp("國會"), "国会");
    }

    #[test]
    fn jp2t_prefers_phrase_over_character_mapping() {
        let cc = OpenCC::new();
        // JPShinjitaiCharacters alone would map 鉄 -> 鐵 in isolation; the phrase entry
        // in JPShinjitaiPhrases wins for the whole word.
        assert_eq!(cc.jp2t("鉄道"), "鐵道");
        assert_eq!(cc.jp2t("図書館"), "圖書館");
    }

    #[test]
    fn hk2s_phrase_override_prevents_particle_collapse() {
        let cc = OpenCC::new();
        // In isolation 著 collapses to the particle 着 under the HK reverse mapping...
        assert_eq!(cc.hk2s("著"), "着");
        // ...but 著作/著者 are overridden at the phrase level to keep the "author" sense.
        assert_eq!(cc.hk2s("著作"), "著作");
    }

    #[test]
    fn s2hk_chains_s2t_then_hk_variant() {
        let cc = OpenCC::new();
        assert_eq!(cc.s2hk("里"), "裏");
    }

    #[test]
    fn stateful_convert_uses_current_config() {
        let mut cc = OpenCC::new();
        assert_eq!(cc.get_config(), "s2t");
        cc.set_config("s2tw");
        assert_eq!(cc.get_config(), "s2tw");
        assert_eq!(cc.convert("汉字", false), "漢字");
    }

    #[test]
    fn set_config_falls_back_to_s2t_on_unknown_name() {
        let mut cc = OpenCC::new();
        cc.set_config("not_a_real_config");
        assert_eq!(cc.get_config(), "s2t");
        assert!(OpenCC::get_last_error().is_some());
    }

    #[test]
    fn new_with_unknown_config_falls_back_and_still_converts() {
        let cc = OpenCC::with_config("bogus");
        assert_eq!(cc.get_config(), "s2t");
        assert_eq!(cc.convert("头发", false), "頭髮");
    }

    #[test]
    fn convert_with_config_reports_invalid_config_without_panicking() {
        let cc = OpenCC::new();
        let out = cc.convert_with_config("头发", "not_a_real_config", false);
        assert!(out.contains("Invalid config"));
    }

    #[test]
    fn supported_configs_enumeration() {
        assert_eq!(OpenCC::get_supported_configs().len(), 16);
        assert!(OpenCC::is_supported_config("S2TWP"));
        assert!(!OpenCC::is_supported_config("xx2yy"));
    }

    #[test]
    fn zho_check_detects_traditional_and_simplified() {
        let cc = OpenCC::new();
        assert_eq!(cc.zho_check("愛"), 1);
        assert_eq!(cc.zho_check("爱"), 2);
        assert_eq!(cc.zho_check("hello world!"), 0);
        assert_eq!(cc.zho_check(""), 0);
    }

    #[test]
    fn empty_and_delimiter_only_input_is_identity() {
        let cc = OpenCC::new();
        assert_eq!(cc.convert("", false), "");
        assert_eq!(cc.s2t("   ,  !", false), "   ,  !");
    }

    #[test]
    fn parallel_and_sequential_paths_agree() {
        let mut cc = OpenCC::new();
        let text = "头发理发发型假发皇后太后干杯饼干计算机网络台湾中国".repeat(200);

        cc.set_parallel(true);
        let parallel_out = cc.s2t(&text, false);

        cc.set_parallel(false);
        let sequential_out = cc.s2t(&text, false);

        assert_eq!(parallel_out, sequential_out);
    }

    #[test]
    fn idempotent_for_shipped_seed_lexicon() {
        let cc = OpenCC::new();
        let once = cc.s2t("头发理发计算机网络台湾", false);
        let twice = cc.s2t(&once, false);
        assert_eq!(once, twice);
    }
}

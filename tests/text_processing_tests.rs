//! # Extraction Tests
//!
//! Quantity/unit extraction over realistic ingredient lines.

use pantry_match::ingredient_model::{Category, StructuredIngredient};
use pantry_match::ingredient_parser::{
    extract_structured, normalize_unicode_fractions, parse_ingredient_line, parse_ingredient_list,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_examples() {
        assert_eq!(normalize_unicode_fractions("1½ cups flour"), "1.5 cups flour");
        assert_eq!(normalize_unicode_fractions("¾ tsp salt"), "0.75 tsp salt");
    }

    #[test]
    fn test_every_table_glyph() {
        let expected = [
            ("½", "0.5"),
            ("⅓", "0.33"),
            ("⅔", "0.67"),
            ("¼", "0.25"),
            ("¾", "0.75"),
            ("⅕", "0.2"),
            ("⅖", "0.4"),
            ("⅗", "0.6"),
            ("⅘", "0.8"),
            ("⅙", "0.17"),
            ("⅚", "0.83"),
            ("⅛", "0.125"),
            ("⅜", "0.375"),
            ("⅝", "0.625"),
            ("⅞", "0.875"),
        ];
        for (glyph, value) in expected {
            assert_eq!(normalize_unicode_fractions(glyph), value);
            assert_eq!(normalize_unicode_fractions(&format!("3{}", glyph)), format!("3{}", &value[1..]));
        }
    }

    #[test]
    fn test_garlic_cloves() {
        let result = extract_structured(&StructuredIngredient::new("2 cloves garlic"));
        assert_eq!(result.amount, "2");
        assert_eq!(result.unit, "clove");
        assert_eq!(result.name, "garlic");
        assert_eq!(result.display_name.as_deref(), Some("garlic"));
    }

    #[test]
    fn test_bare_quantity_eggs() {
        let result = extract_structured(&StructuredIngredient::new("3 eggs"));
        assert_eq!(result.amount, "3");
        assert_eq!(result.unit, "");
        assert_eq!(result.name, "eggs");
    }

    #[test]
    fn test_amount_present_is_untouched() {
        let input = StructuredIngredient {
            amount: "2".to_string(),
            ..StructuredIngredient::new("2 cups flour")
        };
        assert_eq!(extract_structured(&input), input);
    }

    #[test]
    fn test_unit_vocabulary_lines() {
        let cases = [
            ("200 grams dark chocolate", "200", "g", "dark chocolate"),
            ("1 kg potatoes", "1", "kg", "potatoes"),
            ("250 ml milk", "250", "ml", "milk"),
            ("1.5 liters stock", "1.5", "l", "stock"),
            ("2 tbsp. soy sauce", "2", "tbsp", "soy sauce"),
            ("1 teaspoon cumin", "1", "tsp", "cumin"),
            ("8 ounces cream cheese", "8", "oz", "cream cheese"),
            ("2 pounds ground beef", "2", "lb", "ground beef"),
            ("1 can chickpeas", "1", "can", "chickpeas"),
            ("2 jars passata", "2", "jar", "passata"),
            ("4 slices bacon", "4", "slice", "bacon"),
            ("6 pieces chicken wings", "6", "piece", "chicken wings"),
            ("1 bunch cilantro", "1", "bunch", "cilantro"),
            ("3 sprigs thyme", "3", "sprig", "thyme"),
            ("1 head broccoli", "1", "head", "broccoli"),
            ("2 stalks celery", "2", "stalk", "celery"),
            ("4 strips lemon zest", "4", "strip", "lemon zest"),
            ("2 fillets salmon", "2", "fillet", "salmon"),
            ("2 breasts chicken", "2", "breast", "chicken"),
            ("6 thighs chicken", "6", "thigh", "chicken"),
            ("4 legs duck", "4", "leg", "duck"),
            ("2 sheets puff pastry", "2", "sheet", "puff pastry"),
            ("1 pack tofu", "1", "pack", "tofu"),
            ("1 handful spinach", "1", "handful", "spinach"),
            ("1 pinch nutmeg", "1", "pinch", "nutmeg"),
            ("2 dashes hot sauce", "2", "dash", "hot sauce"),
        ];

        for (line, amount, unit, name) in cases {
            let result = parse_ingredient_line(line);
            assert_eq!(result.amount, amount, "amount for '{}'", line);
            assert_eq!(result.unit, unit, "unit for '{}'", line);
            assert_eq!(result.name, name, "name for '{}'", line);
        }
    }

    #[test]
    fn test_range_and_fraction_literals_not_evaluated() {
        assert_eq!(parse_ingredient_line("2-3 cloves garlic").amount, "2-3");
        assert_eq!(parse_ingredient_line("1/2 cup sugar").amount, "1/2");
        assert_eq!(parse_ingredient_line("1½-2 cups rice").amount, "1.5-2");
    }

    #[test]
    fn test_unit_word_never_left_on_name() {
        let result = parse_ingredient_line("2 Cups Flour");
        assert_eq!(result.unit, "cup");
        assert_eq!(result.name, "Flour");

        let result = parse_ingredient_line("2 cups, sifted flour");
        assert_eq!(result.unit, "cup");
        assert_eq!(result.name, "sifted flour");

        for line in ["2 cups", "1 1/2 cup", "3 g"] {
            let result = parse_ingredient_line(line);
            assert_eq!(result.amount, "", "amount for '{}'", line);
            assert_eq!(result.name, line);
        }
    }

    #[test]
    fn test_spaced_glyph_joins_whole_number() {
        let result = parse_ingredient_line("1 ½ cups flour");
        assert_eq!(result.amount, "1.5");
        assert_eq!(result.unit, "cup");
        assert_eq!(result.name, "flour");
    }

    #[test]
    fn test_metadata_survives_extraction() {
        let input = StructuredIngredient::new("2 cloves garlic")
            .with_category(Category::Flavor)
            .with_substitutes(["garlic powder"]);
        let result = extract_structured(&input);
        assert_eq!(result.category, Some(Category::Flavor));
        assert_eq!(result.substitutes, vec!["garlic powder".to_string()]);
    }

    #[test]
    fn test_idempotent_over_recipe() {
        let text = "1½ cups flour\n2 cloves garlic\n3 eggs\nsalt to taste\n¼ cup olive oil\n2-3 sprigs rosemary";
        let once = parse_ingredient_list(text);
        let twice: Vec<_> = once.iter().map(extract_structured).collect();
        assert_eq!(once, twice);

        for ingredient in &once {
            assert!(
                !ingredient.name.starts_with(|c: char| c.is_ascii_digit()),
                "name still starts with a quantity: '{}'",
                ingredient.name
            );
        }
    }
}

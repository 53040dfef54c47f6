//! Built-in pt-BR value fabrication

use rand::{Rng, RngCore};

use super::path::{CompanyField, DataPath, LocationField, PersonField, ProductField};
use super::words;
use super::ValueProvider;

/// Stateless provider producing Brazilian-flavoured values
///
/// Every call draws fresh values from the supplied RNG; nothing is shared
/// between calls, so two `person.*` placeholders never describe the same
/// person. CPF, CNPJ and EAN values carry valid check digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct FakeProvider;

impl ValueProvider for FakeProvider {
    fn value_for(&self, path: DataPath, rng: &mut dyn RngCore) -> Option<String> {
        let value = match path {
            DataPath::Person(field) => person(field, rng),
            DataPath::Company(field) => company(field, rng),
            DataPath::Location(field) => location(field, rng),
            DataPath::Product(field) => product(field, rng),
        };
        Some(value)
    }
}

fn person(field: PersonField, rng: &mut dyn RngCore) -> String {
    match field {
        PersonField::Name => format!(
            "{} {} {}",
            pick(rng, words::FIRST_NAMES),
            pick(rng, words::SURNAMES),
            pick(rng, words::SURNAMES)
        ),
        PersonField::Cpf => cpf(rng),
        PersonField::Rg => {
            let d = digits(rng, 9);
            format!("{}.{}.{}-{}", &d[0..2], &d[2..5], &d[5..8], &d[8..9])
        }
        PersonField::Phone => format!(
            "({}) 9{}-{}",
            rng.gen_range(11..=99),
            digits(rng, 4),
            digits(rng, 4)
        ),
        PersonField::Email => format!(
            "{}.{}{}@{}",
            fold_ascii(pick(rng, words::FIRST_NAMES)),
            fold_ascii(pick(rng, words::SURNAMES)),
            rng.gen_range(1..100),
            pick(rng, words::EMAIL_DOMAINS)
        ),
    }
}

fn company(field: CompanyField, rng: &mut dyn RngCore) -> String {
    match field {
        CompanyField::CompanyName => format!(
            "{} {} {}",
            pick(rng, words::SURNAMES),
            pick(rng, words::SURNAMES),
            pick(rng, words::COMPANY_SUFFIXES)
        ),
        CompanyField::FantasyName => format!(
            "{} {}",
            pick(rng, words::FANTASY_WORDS),
            pick(rng, words::FANTASY_NOUNS)
        ),
        CompanyField::Cnpj => cnpj(rng),
        CompanyField::Ie => fixed_len_number(rng, 9),
    }
}

fn location(field: LocationField, rng: &mut dyn RngCore) -> String {
    match field {
        LocationField::Street => format!(
            "{} {}",
            pick(rng, words::STREET_PREFIXES),
            pick(rng, words::STREET_NAMES)
        ),
        LocationField::Number => rng.gen_range(0..1000).to_string(),
        LocationField::District => pick(rng, words::DISTRICTS).to_string(),
        LocationField::CityName => pick(rng, words::CITIES).to_string(),
        LocationField::CityCode => fixed_len_number(rng, 7),
        LocationField::StateAbbr => pick(rng, words::STATES).to_string(),
        LocationField::Postcode => format!("{}-{}", digits(rng, 5), digits(rng, 3)),
    }
}

fn product(field: ProductField, rng: &mut dyn RngCore) -> String {
    match field {
        ProductField::Description => format!(
            "{} {} {}",
            pick(rng, words::PRODUCT_ADJECTIVES),
            pick(rng, words::PRODUCT_NOUNS),
            pick(rng, words::PRODUCT_TRAITS)
        ),
        ProductField::Ean => ean13(rng),
        ProductField::Ncm => fixed_len_number(rng, 8),
        ProductField::Price => {
            let cents: u32 = rng.gen_range(1_000..=100_000);
            format!("{}.{:02}", cents / 100, cents % 100)
        }
    }
}

fn pick(rng: &mut dyn RngCore, list: &'static [&'static str]) -> &'static str {
    list[rng.gen_range(0..list.len())]
}

fn digit_vec(rng: &mut dyn RngCore, count: usize) -> Vec<u32> {
    (0..count).map(|_| rng.gen_range(0..10)).collect()
}

fn render_digits(digits: &[u32]) -> String {
    digits
        .iter()
        .filter_map(|&d| char::from_digit(d, 10))
        .collect()
}

fn digits(rng: &mut dyn RngCore, count: usize) -> String {
    render_digits(&digit_vec(rng, count))
}

/// `count` digits with a non-zero leading digit
fn fixed_len_number(rng: &mut dyn RngCore, count: usize) -> String {
    let mut value = digit_vec(rng, count);
    if let Some(first) = value.first_mut() {
        *first = rng.gen_range(1..10);
    }
    render_digits(&value)
}

/// Modulo-11 check digit shared by CPF and CNPJ
fn mod11(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    match sum % 11 {
        0 | 1 => 0,
        rest => 11 - rest,
    }
}

fn cpf(rng: &mut dyn RngCore) -> String {
    let mut d = digit_vec(rng, 9);
    d.push(mod11(&d, &[10, 9, 8, 7, 6, 5, 4, 3, 2]));
    d.push(mod11(&d, &[11, 10, 9, 8, 7, 6, 5, 4, 3, 2]));
    let d = render_digits(&d);
    format!("{}.{}.{}-{}", &d[0..3], &d[3..6], &d[6..9], &d[9..11])
}

fn cnpj(rng: &mut dyn RngCore) -> String {
    let mut d = digit_vec(rng, 8);
    d.extend([0, 0, 0, 1]);
    d.push(mod11(&d, &[5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2]));
    d.push(mod11(&d, &[6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2]));
    let d = render_digits(&d);
    format!(
        "{}.{}.{}/{}-{}",
        &d[0..2],
        &d[2..5],
        &d[5..8],
        &d[8..12],
        &d[12..14]
    )
}

fn ean13(rng: &mut dyn RngCore) -> String {
    let mut d = digit_vec(rng, 12);
    let sum: u32 = d
        .iter()
        .enumerate()
        .map(|(i, &digit)| if i % 2 == 0 { digit } else { digit * 3 })
        .sum();
    d.push((10 - sum % 10) % 10);
    render_digits(&d)
}

/// Lowercase ASCII slug for e-mail local parts
fn fold_ascii(word: &str) -> String {
    word.chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'Á' | 'À' | 'Â' | 'Ã' => 'a',
            'é' | 'ê' | 'É' | 'Ê' => 'e',
            'í' | 'Í' => 'i',
            'ó' | 'ô' | 'õ' | 'Ó' | 'Ô' | 'Õ' => 'o',
            'ú' | 'ü' | 'Ú' | 'Ü' => 'u',
            'ç' | 'Ç' => 'c',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn only_digits(value: &str) -> Vec<u32> {
        value.chars().filter_map(|c| c.to_digit(10)).collect()
    }

    #[test]
    fn test_every_path_yields_a_non_empty_value() {
        let mut rng = StdRng::seed_from_u64(7);
        for path in DataPath::all() {
            let value = FakeProvider.value_for(path, &mut rng).unwrap();
            assert!(!value.is_empty(), "{path} produced an empty value");
            assert_ne!(value, crate::SENTINEL);
        }
    }

    #[test]
    fn test_same_seed_same_values() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for path in DataPath::all() {
            assert_eq!(
                FakeProvider.value_for(path, &mut a),
                FakeProvider.value_for(path, &mut b)
            );
        }
    }

    #[test]
    fn test_cpf_check_digits_are_valid() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let value = cpf(&mut rng);
            assert_eq!(value.len(), 14);
            let d = only_digits(&value);
            assert_eq!(d[9], mod11(&d[..9], &[10, 9, 8, 7, 6, 5, 4, 3, 2]));
            assert_eq!(d[10], mod11(&d[..10], &[11, 10, 9, 8, 7, 6, 5, 4, 3, 2]));
        }
    }

    #[test]
    fn test_known_cpf_check_digits() {
        // 529.982.247-25 is a commonly published valid CPF.
        let base = [5, 2, 9, 9, 8, 2, 2, 4, 7];
        assert_eq!(mod11(&base, &[10, 9, 8, 7, 6, 5, 4, 3, 2]), 2);
        let mut with_first = base.to_vec();
        with_first.push(2);
        assert_eq!(mod11(&with_first, &[11, 10, 9, 8, 7, 6, 5, 4, 3, 2]), 5);
    }

    #[test]
    fn test_cnpj_shape() {
        let mut rng = StdRng::seed_from_u64(3);
        let value = cnpj(&mut rng);
        assert_eq!(value.len(), 18);
        assert_eq!(&value[10..15], "/0001");
    }

    #[test]
    fn test_ean13_check_digit() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..50 {
            let d = only_digits(&ean13(&mut rng));
            assert_eq!(d.len(), 13);
            let sum: u32 = d
                .iter()
                .enumerate()
                .map(|(i, &digit)| if i % 2 == 0 { digit } else { digit * 3 })
                .sum();
            assert_eq!(sum % 10, 0);
        }
    }

    #[test]
    fn test_price_is_two_decimal_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let value = product(ProductField::Price, &mut rng);
            let (units, cents) = value.split_once('.').unwrap();
            assert_eq!(cents.len(), 2);
            let units: u32 = units.parse().unwrap();
            assert!((10..=1000).contains(&units), "{value}");
        }
    }

    #[test]
    fn test_fixed_length_numbers_have_no_leading_zero() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let code = location(LocationField::CityCode, &mut rng);
            assert_eq!(code.len(), 7);
            assert!(!code.starts_with('0'));
        }
    }

    #[test]
    fn test_email_is_ascii() {
        let mut rng = StdRng::seed_from_u64(13);
        for _ in 0..50 {
            let email = person(PersonField::Email, &mut rng);
            assert!(email.is_ascii(), "{email}");
            assert!(email.contains('@'));
        }
    }

    #[test]
    fn test_postcode_format() {
        let mut rng = StdRng::seed_from_u64(17);
        let postcode = location(LocationField::Postcode, &mut rng);
        assert_eq!(postcode.len(), 9);
        assert_eq!(&postcode[5..6], "-");
    }
}

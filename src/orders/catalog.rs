//! Built-in order catalog
//!
//! The fixed order list the dashboard runs on when no backend is attached.

use super::Order;

/// (id, customer, amount in cents)
const SAMPLE_ORDERS: [(u32, &str, i64); 50] = [
    (1, "Lauren Franklin", 51213),
    (2, "Joshua Finnerud", 118290),
    (3, "Parel Agricola", 154595),
    (4, "Elias Korpela", 108376),
    (5, "یاسمین مرادی", 23667),
    (6, "Sofia Garza", 89347),
    (7, "Henry Douglas", 161598),
    (8, "Luis Lucero", 79146),
    (9, "Josefine Jørgensen", 149283),
    (10, "Calvin Taylor", 64413),
    (11, "Herlander Lima", 52378),
    (12, "Rémi Garcia", 193150),
    (13, "Asher Robinson", 191897),
    (14, "Yovilla Gayda", 158018),
    (15, "Bobbie Lucas", 114123),
    (16, "Nurdan Abadan", 54420),
    (17, "پرهام حیدری", 136125),
    (18, "Mestan Okumuş", 123397),
    (19, "Summer Jones", 92709),
    (20, "Galina Dinčić", 35007),
    (21, "Cilly Fink", 120383),
    (22, "Andrea Marinković", 164264),
    (23, "Milan Grigorcev", 44155),
    (24, "Harriet Turner", 199424),
    (25, "Aradhna Smit", 130582),
    (26, "Abdulrahman Nærø", 106227),
    (27, "Moema Silveira", 96614),
    (28, "Roy Evans", 10488),
    (29, "Madhumita Kumar", 81257),
    (30, "Aleksi Rautio", 27921),
    (31, "Manon Aubert", 192270),
    (32, "Simon Johansen", 56384),
    (33, "Mayte Brookman", 97522),
    (34, "Debra Brewer", 53926),
    (35, "Georgia Lewis", 117096),
    (36, "Tamara Kril", 93553),
    (37, "Zoneide Caldeira", 23308),
    (38, "Kiara Dupuis", 114797),
    (39, "Lydia Gauthier", 109039),
    (40, "یاسمن موسوی", 152783),
    (41, "Esma Çevik", 141510),
    (42, "غزل حسینی", 185348),
    (43, "Fabiele Monteiro", 122778),
    (44, "Sofie Christensen", 60211),
    (45, "Kreszentia Hörner", 64640),
    (46, "Coşkun Poçan", 54612),
    (47, "Ella Lee", 193268),
    (48, "Ellen Aurdal", 159790),
    (49, "Sebastião Barros", 109043),
    (50, "Emilie Berg", 193289),
];

/// The built-in 50-order catalog, ordered by id
pub fn sample_orders() -> Vec<Order> {
    SAMPLE_ORDERS
        .iter()
        .map(|&(id, name, cents)| Order::from_cents(id, name, cents))
        .collect()
}

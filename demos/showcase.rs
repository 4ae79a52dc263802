fn double(n: i32) -> i32 {
    let d: i32 = n * 2;
    return d;
}
fn main() {
    let xs: [i32; 3] = [1, 2, 3];
    for x in xs.iter() {
        println!("{}", x);
    }
    let y: i32 = double(21);
    println!("{}", y);
    let ratio: f32 = 0.5;
    println!("{}", ratio);
    let greeting: &str = "hi";
    println!("{}", greeting);
}
